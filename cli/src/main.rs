#![deny(missing_docs)]

//! # API UI CLI
//!
//! Command Line Interface for the API UI integration pipeline.
//!
//! Supported Commands:
//! - `integrate`: Prints the API UI model of an OpenAPI document as JSON.
//! - `check`: Reports the diagnostics met while integrating a document.
//!
//! Logging goes to stderr and honours `RUST_LOG`. A `.env` file in the
//! working directory is loaded before arguments are parsed.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::CliResult;

mod check;
mod error;
mod integrate;
mod source;

const DEFAULT_FILTER: &str = "apiui=info,apiui_core=info";
const VERBOSE_FILTER: &str = "apiui=debug,apiui_core=debug";

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI to API UI model integration")]
struct Cli {
    /// Enable debug logging (ignored when `RUST_LOG` is set).
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the API UI model of a document as JSON.
    Integrate(integrate::IntegrateArgs),
    /// Report every diagnostic met while integrating a document.
    Check(check::CheckArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "no model produced");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> CliResult<ExitCode> {
    let mut stdout = std::io::stdout();

    match &cli.command {
        Commands::Integrate(args) => {
            integrate::execute(args, shutdown_signal(), &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check(args) => {
            let healthy = check::execute(args, shutdown_signal(), &mut stdout).await?;
            Ok(if healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}
