//! In-memory [`RunSource`] for tests.

use std::sync::Mutex;

use anyhow::{Result, bail};
use gitflow_notifier_core::{
    config::Repository,
    models::{JobReport, StepReport},
    test_util::{RUN_ID, RUN_URL, SHA},
};
use time::macros::datetime;

pub use gitflow_notifier_core::test_util::run_config;

use crate::{
    RunSource,
    models::{CommitInfo, JobsPage, RunInfo},
};

/// An unnumbered job with `steps` steps named `"{name} step {n}"`.
pub fn job(name: &str, steps: usize) -> JobReport {
    JobReport {
        job_number: 0,
        name: name.to_string(),
        status: "completed".to_string(),
        conclusion: Some("success".to_string()),
        started_at: None,
        completed_at: None,
        steps: (1..=steps)
            .map(|n| StepReport {
                step_number: 0,
                name: format!("{name} step {n}"),
                status: "completed".to_string(),
                conclusion: Some("success".to_string()),
            })
            .collect(),
    }
}

/// GitHub holding the fixture run and its commit.
pub struct FakeSource {
    pub commit: CommitInfo,
    pub run_id: u64,
    pub run: RunInfo,
    pub jobs: Vec<JobReport>,
    pub per_page: usize,
    pub total_count_override: Option<u64>,
    pub omit_total_count: bool,
    pub fail_jobs_page: Option<u32>,
    pub unreachable: bool,
    pages: Mutex<Vec<u32>>,
}

impl FakeSource {
    pub fn new(conclusion: Option<&str>) -> Self {
        Self {
            commit: CommitInfo {
                sha: SHA.to_string(),
                author_date: Some(datetime!(2024-01-15 10:30:00 UTC)),
            },
            run_id: RUN_ID,
            run: RunInfo {
                name: "release".to_string(),
                conclusion: conclusion.map(str::to_string),
                html_url: RUN_URL.to_string(),
            },
            jobs: vec![],
            per_page: 100,
            total_count_override: None,
            omit_total_count: false,
            fail_jobs_page: None,
            unreachable: false,
            pages: Mutex::new(vec![]),
        }
    }

    /// Add one job per entry, named `job-1`, `job-2`, ... with that many steps.
    pub fn with_jobs(mut self, step_counts: &[usize]) -> Self {
        let offset = self.jobs.len();
        self.jobs.extend(
            step_counts
                .iter()
                .enumerate()
                .map(|(i, &steps)| job(&format!("job-{}", offset + i + 1), steps)),
        );
        self
    }

    /// Job pages requested so far, in order.
    pub fn requested_pages(&self) -> Vec<u32> { self.pages.lock().unwrap().clone() }
}

impl RunSource for FakeSource {
    async fn get_commit(&self, _repo: &Repository, sha: &str) -> Result<Option<CommitInfo>> {
        if self.unreachable {
            bail!("connection refused");
        }
        Ok((self.commit.sha == sha).then(|| self.commit.clone()))
    }

    async fn get_run(&self, _repo: &Repository, run_id: u64) -> Result<Option<RunInfo>> {
        if self.unreachable {
            bail!("connection refused");
        }
        Ok((self.run_id == run_id).then(|| self.run.clone()))
    }

    async fn list_jobs_page(
        &self,
        _repo: &Repository,
        _run_id: u64,
        page: u32,
    ) -> Result<JobsPage> {
        self.pages.lock().unwrap().push(page);
        if self.unreachable || self.fail_jobs_page == Some(page) {
            bail!("connection reset on page {page}");
        }
        let jobs = self
            .jobs
            .iter()
            .skip((page as usize - 1) * self.per_page)
            .take(self.per_page)
            .cloned()
            .collect();
        let total_count = self.total_count_override.unwrap_or(self.jobs.len() as u64);
        Ok(JobsPage { total_count: (!self.omit_total_count).then_some(total_count), jobs })
    }
}
