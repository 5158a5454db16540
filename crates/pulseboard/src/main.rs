//! Main entry point for Pulseboard.

use anyhow::Context;
use clap::Parser;
use pulseboard::{render_json, run, Cli, Pulseboard};
use pulseboard_common::init_logging;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli
        .load_config()
        .context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Starting Pulseboard");

    let app = Pulseboard::new(config)?;
    let document = run(&app, &cli.command).inspect_err(|e| error!("Dashboard failed: {e}"))?;

    println!("{}", render_json(&document)?);
    Ok(())
}
