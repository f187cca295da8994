pub mod inspect;
pub mod jobs;
pub mod models;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

use anyhow::{Context, Result};
use gitflow_notifier_core::config::{GitHubConfig, Repository};
use http::StatusCode;
use octocrab::{GitHubError, Octocrab, models::RunId, params::workflows::Filter};

pub use crate::{
    inspect::resolve_run,
    jobs::{collect_jobs, number_jobs},
};
use crate::models::{CommitInfo, JobsPage, RunInfo, job_report};

/// Jobs requested per page when listing a run's jobs.
pub const JOBS_PER_PAGE: u8 = 100;

/// Read-only view of the GitHub data the notifier needs.
#[allow(async_fn_in_trait)]
pub trait RunSource {
    /// Fetch a commit. `Ok(None)` if it does not exist.
    async fn get_commit(&self, repo: &Repository, sha: &str) -> Result<Option<CommitInfo>>;

    /// Fetch a workflow run. `Ok(None)` if it does not exist.
    async fn get_run(&self, repo: &Repository, run_id: u64) -> Result<Option<RunInfo>>;

    /// Fetch one page (1-based) of a run's jobs, including every attempt.
    async fn list_jobs_page(&self, repo: &Repository, run_id: u64, page: u32) -> Result<JobsPage>;
}

#[derive(Clone)]
pub struct GitHub {
    pub client: Octocrab,
}

impl GitHub {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .base_uri(config.api_url.as_str().trim_end_matches('/'))
            .context("Invalid GitHub API URL")?
            .personal_token(config.token.clone())
            .build()
            .context("Failed to create GitHub client")?;
        tracing::debug!("Using GitHub API at {}", config.api_url);
        Ok(Self { client })
    }
}

impl RunSource for GitHub {
    async fn get_commit(&self, repo: &Repository, sha: &str) -> Result<Option<CommitInfo>> {
        let result = self
            .client
            .repos(&repo.owner, &repo.name)
            .list_commits()
            .sha(sha)
            .per_page(1)
            .send()
            .await;
        let page =
            not_found_as_none(result).with_context(|| format!("Failed to fetch commit {sha}"))?;
        Ok(page.and_then(|page| page.items.into_iter().next()).map(CommitInfo::from))
    }

    async fn get_run(&self, repo: &Repository, run_id: u64) -> Result<Option<RunInfo>> {
        let result = self.client.workflows(&repo.owner, &repo.name).get(RunId(run_id)).await;
        let run = not_found_as_none(result)
            .with_context(|| format!("Failed to fetch workflow run {run_id}"))?;
        Ok(run.map(RunInfo::from))
    }

    async fn list_jobs_page(&self, repo: &Repository, run_id: u64, page: u32) -> Result<JobsPage> {
        let listing = self
            .client
            .workflows(&repo.owner, &repo.name)
            .list_jobs(RunId(run_id))
            .filter(Filter::All)
            .per_page(JOBS_PER_PAGE)
            .page(page)
            .send()
            .await
            .with_context(|| format!("Failed to fetch jobs page {page} for run {run_id}"))?;
        Ok(JobsPage {
            total_count: listing.total_count,
            jobs: listing.items.into_iter().map(job_report).collect(),
        })
    }
}

fn not_found_as_none<T>(result: octocrab::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(octocrab::Error::GitHub { source, .. })
            if matches!(*source, GitHubError { status_code: StatusCode::NOT_FOUND, .. }) =>
        {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
