//! Example service binary

use std::fmt::Display;

use clap::{error::ErrorKind, Parser};
use common::{logging, LogConfig};

use api::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => fatal(e.to_string().trim_end()),
        },
    };

    if let Err(e) = cli::run(cli).await {
        fatal(format!("{:#}", e));
    }
}

/// Log `error` as a structured line and exit 1
fn fatal(error: impl Display) -> ! {
    // Argument parsing or logging setup may fail before a subscriber exists.
    if !tracing::dispatcher::has_been_set() {
        let _ = logging::init(&LogConfig::default());
    }
    tracing::error!(error = %error, "Fatal error");
    std::process::exit(1);
}
