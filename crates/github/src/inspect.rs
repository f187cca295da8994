use anyhow::anyhow;
use gitflow_notifier_core::{
    NotifyError, Result,
    config::RunConfig,
    models::{ResolvedRun, format_subtitle},
    status,
};

use crate::RunSource;

/// Fetch the configured run and its commit and classify the run's conclusion.
pub async fn resolve_run<S: RunSource>(source: &S, config: &RunConfig) -> Result<ResolvedRun> {
    let repo = &config.repository;
    let run_what = format!("workflow run {}", config.run_id);
    let run = source
        .get_run(repo, config.run_id)
        .await
        .map_err(|e| NotifyError::upstream(&run_what, e))?
        .ok_or_else(|| NotifyError::upstream(&run_what, anyhow!("not found in {repo}")))?;

    let commit_what = format!("commit {}", config.sha);
    let commit = source
        .get_commit(repo, &config.sha)
        .await
        .map_err(|e| NotifyError::upstream(&commit_what, e))?
        .ok_or_else(|| NotifyError::upstream(&commit_what, anyhow!("not found in {repo}")))?;
    let commit_author_date = commit
        .author_date
        .ok_or_else(|| NotifyError::upstream(&commit_what, anyhow!("commit has no author date")))?;

    let conclusion = select_conclusion(run.conclusion.as_deref(), config.job_status.as_deref());
    let status = status::resolve(&conclusion);
    tracing::info!(
        "Run {} ({}) concluded {:?}, classified as {}",
        config.run_id,
        run.name,
        conclusion,
        status.id
    );

    Ok(ResolvedRun {
        run_id: config.run_id,
        commit_sha: commit.sha,
        commit_author_date,
        activity_subtitle: format_subtitle(commit_author_date),
        html_url: run.html_url,
        conclusion,
        status,
    })
}

/// The run's own conclusion wins. The legacy `job_status` input only fills in
/// while GitHub has not recorded a conclusion yet.
fn select_conclusion(run_conclusion: Option<&str>, job_status: Option<&str>) -> String {
    let run_conclusion = run_conclusion.filter(|c| !c.is_empty());
    match (run_conclusion, job_status) {
        (Some(conclusion), _) => conclusion.to_string(),
        (None, Some(job_status)) => {
            tracing::debug!("Run has no conclusion yet, using job_status {job_status:?}");
            job_status.to_string()
        }
        (None, None) => status::StatusId::Unknown.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use gitflow_notifier_core::{
        CardColor, StatusId,
        test_util::{RUN_URL, SHA},
    };

    use super::*;
    use crate::fake::{FakeSource, run_config};

    #[test]
    fn test_select_conclusion() {
        let cases: &[(Option<&str>, Option<&str>, &str)] = &[
            (Some("success"), None, "success"),
            (Some("failure"), Some("success"), "failure"),
            (Some("SUCCESS"), Some("failure"), "SUCCESS"),
            (None, Some("cancelled"), "cancelled"),
            (Some(""), Some("skipped"), "skipped"),
            (None, None, "unknown"),
        ];
        for &(run_conclusion, job_status, expected) in cases {
            assert_eq!(select_conclusion(run_conclusion, job_status), expected);
        }
    }

    #[tokio::test]
    async fn test_resolve_success_mixed_case() {
        let source = FakeSource::new(Some("SUCCESS"));
        let resolved = resolve_run(&source, &run_config()).await.unwrap();
        assert_eq!(resolved.run_id, 9876543210);
        assert_eq!(resolved.commit_sha, SHA);
        assert_eq!(resolved.conclusion, "SUCCESS");
        assert_eq!(resolved.status.id, StatusId::Success);
        assert_eq!(resolved.status.color, CardColor::Good);
        assert_eq!(resolved.activity_subtitle, "2024-01-15 10:30:00 UTC");
        assert_eq!(resolved.html_url, RUN_URL);
    }

    #[tokio::test]
    async fn test_resolve_unrecognized_conclusion() {
        let source = FakeSource::new(Some("weird_value"));
        let resolved = resolve_run(&source, &run_config()).await.unwrap();
        assert_eq!(resolved.conclusion, "weird_value");
        assert_eq!(resolved.status.id, StatusId::Unknown);
        assert_eq!(resolved.status.title, "No job context has been provided");
    }

    #[tokio::test]
    async fn test_resolve_uses_job_status_when_in_progress() {
        let source = FakeSource::new(None);
        let mut config = run_config();
        config.job_status = Some("failure".to_string());
        let resolved = resolve_run(&source, &config).await.unwrap();
        assert_eq!(resolved.status.id, StatusId::Failure);

        config.job_status = None;
        let resolved = resolve_run(&source, &config).await.unwrap();
        assert_eq!(resolved.conclusion, "unknown");
        assert_eq!(resolved.status.id, StatusId::Unknown);
    }

    #[tokio::test]
    async fn test_resolve_missing_resources() {
        let mut config = run_config();
        config.run_id = 1;
        let err = resolve_run(&FakeSource::new(Some("success")), &config).await.unwrap_err();
        assert!(matches!(
            &err,
            NotifyError::UpstreamFetch { what, .. } if what == "workflow run 1"
        ));

        let mut config = run_config();
        config.sha = "0000000".to_string();
        let err = resolve_run(&FakeSource::new(Some("success")), &config).await.unwrap_err();
        assert!(matches!(
            &err,
            NotifyError::UpstreamFetch { what, .. } if what == "commit 0000000"
        ));
    }

    #[tokio::test]
    async fn test_resolve_upstream_failure() {
        let mut source = FakeSource::new(Some("success"));
        source.unreachable = true;
        let err = resolve_run(&source, &run_config()).await.unwrap_err();
        assert!(matches!(err, NotifyError::UpstreamFetch { .. }));
    }

    #[tokio::test]
    async fn test_resolve_missing_author_date() {
        let mut source = FakeSource::new(Some("success"));
        source.commit.author_date = None;
        let err = resolve_run(&source, &run_config()).await.unwrap_err();
        assert!(matches!(
            &err,
            NotifyError::UpstreamFetch { what, .. } if what.starts_with("commit")
        ));
    }
}
