use std::io::Write;

use anyhow::{Context, Result};
use argp::FromArgs;
use gitflow_notifier_core::StatusId;

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// List the status catalog used to decorate notifications.
#[argp(subcommand, name = "statuses")]
pub struct Args {}

pub fn run(_args: Args) -> Result<()> {
    write_catalog(std::io::stdout().lock()).context("Failed to write status catalog")
}

fn write_catalog(mut out: impl Write) -> std::io::Result<()> {
    for id in StatusId::ALL {
        let status = id.descriptor();
        writeln!(
            out,
            "{:<10} {}  {:<9} {}  {}",
            id.as_str(),
            status.icon,
            status.color.as_str(),
            status.title,
            status.image_url
        )?;
    }
    Ok(())
}
