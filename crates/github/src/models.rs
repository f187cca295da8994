//! The parts of GitHub's commits, runs and jobs the notifier reads, reduced
//! from octocrab's models.

use std::fmt;

use gitflow_notifier_core::models::{JobReport, StepReport, utc_from_unix};
use octocrab::models::{
    repos::RepoCommit,
    workflows::{Job, Run, Step},
};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    /// `None` if GitHub reported no author date.
    pub author_date: Option<OffsetDateTime>,
}

impl From<RepoCommit> for CommitInfo {
    fn from(commit: RepoCommit) -> Self {
        Self {
            sha: commit.sha,
            author_date: commit
                .commit
                .author
                .and_then(|author| author.date)
                .and_then(|date| utc_from_unix(date.timestamp())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub name: String,
    /// `None` while the run is still in progress.
    pub conclusion: Option<String>,
    pub html_url: String,
}

impl From<Run> for RunInfo {
    fn from(run: Run) -> Self {
        Self { name: run.name, conclusion: run.conclusion, html_url: run.html_url.to_string() }
    }
}

/// One page of a run's jobs. Jobs and steps are not numbered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsPage {
    /// Total across all pages, when GitHub reports it.
    pub total_count: Option<u64>,
    pub jobs: Vec<JobReport>,
}

/// Unnumbered report for a job; see [`crate::number_jobs`].
pub fn job_report(job: Job) -> JobReport {
    JobReport {
        job_number: 0,
        name: job.name,
        status: wire_name(&job.status),
        conclusion: job.conclusion.as_ref().map(wire_name),
        started_at: utc_from_unix(job.started_at.timestamp()),
        completed_at: job.completed_at.and_then(|date| utc_from_unix(date.timestamp())),
        steps: job.steps.into_iter().map(step_report).collect(),
    }
}

fn step_report(step: Step) -> StepReport {
    StepReport {
        step_number: 0,
        name: step.name,
        status: wire_name(&step.status),
        conclusion: step.conclusion.as_ref().map(wire_name),
    }
}

/// The value as GitHub spells it on the wire, e.g. `in_progress`.
fn wire_name<T: Serialize + fmt::Debug>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        _ => format!("{value:?}").to_lowercase(),
    }
}
