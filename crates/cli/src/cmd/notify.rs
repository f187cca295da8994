use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result, bail};
use argp::FromArgs;
use gitflow_notifier_card::{NotificationCard, TeamsWebhook, adaptive};
use gitflow_notifier_core::config::{
    Config, ConfigVars, KEY_DRY_RUN, KEY_RELEASE_NOTES_PATH, KEY_WEBHOOK_URL,
};
use gitflow_notifier_github::GitHub;

use crate::{pipeline, util::path_buf};

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Resolve the current workflow run and post its notification card.
#[argp(subcommand, name = "notify")]
pub struct Args {
    #[argp(switch, short = 'n')]
    /// print the rendered card instead of posting it
    dry_run: bool,
    #[argp(option, short = 'c', from_str_fn(path_buf))]
    /// YAML file with configuration values (environment wins)
    config: Option<PathBuf>,
    #[argp(option, from_str_fn(path_buf))]
    /// release notes file
    release_notes: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<()> {
    let vars = load_vars(&args, ConfigVars::from_env())?;
    let config = Config::from_vars(&vars)?;
    tracing::info!(
        "Notifying for run {} of {} at {}",
        config.run.run_id,
        config.run.repository,
        config.run.release_ref
    );
    let github = GitHub::new(&config.github)?;
    let outcome = pipeline::assemble(&github, &config).await?;
    tracing::info!(
        "Run {} concluded {} ({})",
        outcome.run.run_id,
        outcome.run.conclusion,
        outcome.run.status.title
    );
    dispatch(&config, &outcome.card, std::io::stdout()).await
}

/// Command line flags override the environment, which overrides the config file.
fn load_vars(args: &Args, env: ConfigVars) -> Result<ConfigVars> {
    let mut vars = match &args.config {
        Some(path) => ConfigVars::from_yaml_file(path)?.layer(env),
        None => env,
    };
    if args.dry_run {
        vars.set(KEY_DRY_RUN, "true");
    }
    if let Some(path) = &args.release_notes {
        vars.set(KEY_RELEASE_NOTES_PATH, path.to_string_lossy());
    }
    Ok(vars)
}

async fn dispatch(config: &Config, card: &NotificationCard, mut out: impl Write) -> Result<()> {
    if config.notify.dry_run {
        let payload = serde_json::to_string_pretty(&adaptive::render_message(card))
            .context("Failed to serialize card")?;
        writeln!(out, "{payload}").context("Failed to write card")?;
        tracing::info!("Dry run, notification not sent");
        return Ok(());
    }
    let Some(url) = config.notify.webhook_url.clone() else {
        bail!("{KEY_WEBHOOK_URL} is not set");
    };
    TeamsWebhook::new(url)?.send(card).await?;
    Ok(())
}
