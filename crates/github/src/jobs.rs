use anyhow::Context;
use gitflow_notifier_core::{
    NotifyError, Result,
    config::{Repository, RunConfig},
    models::JobReport,
};

use crate::RunSource;

/// Enumerate every job of the configured run and number jobs and steps.
///
/// Each call re-fetches from GitHub. Any failed page fails the whole
/// collection; jobs gathered from earlier pages are dropped.
pub async fn collect_jobs<S: RunSource>(source: &S, config: &RunConfig) -> Result<Vec<JobReport>> {
    let jobs = fetch_all_jobs(source, &config.repository, config.run_id)
        .await
        .map_err(|e| NotifyError::upstream(format!("jobs for run {}", config.run_id), e))?;
    let reports = number_jobs(jobs);
    tracing::info!(
        "Collected {} jobs ({} steps) for run {}",
        reports.len(),
        reports.iter().map(|job| job.steps.len()).sum::<usize>(),
        config.run_id
    );
    Ok(reports)
}

/// Pages stop once `total_count` jobs are in hand or a page comes back empty.
async fn fetch_all_jobs<S: RunSource>(
    source: &S,
    repo: &Repository,
    run_id: u64,
) -> anyhow::Result<Vec<JobReport>> {
    let mut jobs = Vec::new();
    let mut page = 1;
    loop {
        let listing = source
            .list_jobs_page(repo, run_id, page)
            .await
            .with_context(|| format!("Failed after {} jobs", jobs.len()))?;
        if listing.jobs.is_empty() {
            break;
        }
        jobs.extend(listing.jobs);
        if listing.total_count.is_some_and(|total| jobs.len() as u64 >= total) {
            break;
        }
        page += 1;
    }
    tracing::debug!("Run {} (jobs {}, pages {})", run_id, jobs.len(), page);
    Ok(jobs)
}

/// Number jobs `1..=J` and steps `1..=S` in enumeration order. Step numbers
/// run across the whole run instead of restarting for each job.
pub fn number_jobs(mut jobs: Vec<JobReport>) -> Vec<JobReport> {
    let mut preceding_steps = 0;
    for (job_index, job) in jobs.iter_mut().enumerate() {
        job.job_number = job_index + 1;
        for (step_index, step) in job.steps.iter_mut().enumerate() {
            step.step_number = preceding_steps + step_index + 1;
        }
        preceding_steps += job.steps.len();
    }
    jobs
}
