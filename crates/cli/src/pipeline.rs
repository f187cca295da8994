use gitflow_notifier_card::{CardBuilder, NotificationCard};
use gitflow_notifier_core::{
    Result,
    config::Config,
    models::{JobReport, ResolvedRun},
};
use gitflow_notifier_github::{RunSource, collect_jobs, resolve_run};

pub struct Outcome {
    pub run: ResolvedRun,
    /// Only collected for runs that ended in success or failure.
    pub jobs: Option<Vec<JobReport>>,
    pub card: NotificationCard,
}

/// Resolve the run, collect job details for terminal runs, and build the card.
/// Every status produces a card, including cancelled, skipped and unknown.
pub async fn assemble<S: RunSource>(source: &S, config: &Config) -> Result<Outcome> {
    let run = resolve_run(source, &config.run).await?;
    let jobs = if run.status.id.is_terminal() {
        Some(collect_jobs(source, &config.run).await?)
    } else {
        tracing::info!("Run {} is {}, skipping job details", run.run_id, run.status.id);
        None
    };
    let card = CardBuilder::new(config).build(&run, jobs.as_deref());
    Ok(Outcome { run, jobs, card })
}
