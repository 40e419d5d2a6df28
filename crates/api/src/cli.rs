//! Command-line entry point
//!
//! `app` has no subcommands and no flags beyond `--help` / `--version`.
//! Stray positional arguments are accepted and ignored.

use anyhow::Context;
use clap::Parser;
use common::{logging, Config};
use tracing::{debug, warn};

use crate::server::Server;

#[derive(Parser, Debug)]
#[command(name = "app", version, about = "Example Go application")]
pub struct Cli {
    #[arg(hide = true)]
    pub args: Vec<String>,
}

/// Load config, start logging, then bind and serve until shutdown
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init(&config.logging).context("failed to initialise logging")?;

    for warning in &config.warnings {
        warn!("{}", warning);
    }
    if !cli.args.is_empty() {
        debug!(args = ?cli.args, "Ignoring positional arguments");
    }

    let server = Server::bind(&config.server).await?;
    server.run().await?;

    Ok(())
}
