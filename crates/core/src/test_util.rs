//! Fixtures shared by the workspace's tests.

use std::path::Path;

use crate::config::{Config, ConfigVars, KEY_RELEASE_NOTES_PATH, Repository, RunConfig};

pub const SHA: &str = "3f2a1b4c5d6e7f8091a2b3c4d5e6f708192a3b4c";
pub const RUN_ID: u64 = 9876543210;
pub const RELEASE_REF: &str = "refs/tags/v1.2.0";
pub const RUN_URL: &str = "https://github.com/octo-org/release-app/actions/runs/9876543210";

/// Dry-run configuration for `octo-org/release-app` reading notes from `release_notes_path`.
pub fn config(release_notes_path: &Path) -> Config {
    let run_id = RUN_ID.to_string();
    let mut vars: ConfigVars = [
        ("GITHUB_REPOSITORY", "octo-org/release-app"),
        ("GITHUB_RUN_ID", run_id.as_str()),
        ("GITHUB_SHA", SHA),
        ("GITHUB_REF", RELEASE_REF),
        ("token", "ghp_secret"),
        ("dry_run", "true"),
    ]
    .into_iter()
    .collect();
    vars.set(KEY_RELEASE_NOTES_PATH, release_notes_path.to_string_lossy());
    match Config::from_vars(&vars) {
        Ok(config) => config,
        Err(e) => panic!("fixture configuration rejected: {e}"),
    }
}

pub fn run_config() -> RunConfig {
    RunConfig {
        repository: Repository { owner: "octo-org".to_string(), name: "release-app".to_string() },
        run_id: RUN_ID,
        sha: SHA.to_string(),
        release_ref: RELEASE_REF.to_string(),
        job_status: None,
    }
}
