mod cli;

use clap::Parser;
use std::process::ExitCode;
use storefront::error::RuntimeError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI first to get verbose flag
    let cli = cli::Cli::parse();

    // Default to warn level (quiet), info on --verbose, or respect RUST_LOG env var
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli::execute(cli).await {
        Ok(code) => code,
        Err(err) => {
            let detail = format!("{:#}", err);
            tracing::error!("command failed: {}", detail);
            eprintln!("{}", RuntimeError::unavailable(err));
            eprintln!("  caused by: {}", detail);
            ExitCode::FAILURE
        }
    }
}
