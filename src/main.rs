//! `bfx` - Bitfinex API command line tool.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use bitfinex_cli::cli::{Cli, execute, render_json, report_api_error};
use bitfinex_cli::config::Config;
use bitfinex_cli::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Usage errors exit here, before configuration or network access.
    let cli = Cli::parse();
    init_logging();

    let config = Config::from_env().context("failed to load configuration")?;
    debug!(base_url = %config.base_url, "configuration loaded");
    let client = config.client().context("failed to build HTTP client")?;

    let response = execute(&client, &cli.command)
        .await
        .with_context(|| format!("request to {} failed", cli.command.endpoint()))?;
    report_api_error(&cli.command, &response);

    println!("{}", render_json(&response)?);
    Ok(())
}
