#![deny(missing_docs)]

//! # Integrate Command
//!
//! Writes the API UI model of a document as JSON. Diagnostics go to the log.

use std::future::Future;
use std::io::Write;

use crate::error::CliResult;
use crate::source::SourceArgs;

/// Arguments for the integrate command.
#[derive(clap::Args, Debug, Clone)]
pub struct IntegrateArgs {
    /// Document to ingest.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Pretty-print the JSON output.
    #[clap(long)]
    pub pretty: bool,
}

/// Executes the integration and writes the model to `out`.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `cancel` - Completes when the request should be abandoned.
/// * `out` - Destination of the JSON document.
pub async fn execute<F, W>(args: &IntegrateArgs, cancel: F, out: &mut W) -> CliResult<()>
where
    F: Future<Output = ()>,
    W: Write,
{
    let integration = args.source.integrate(cancel).await?;

    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, &integration.model)?;
    } else {
        serde_json::to_writer(&mut *out, &integration.model)?;
    }
    writeln!(out)?;

    if integration.is_degraded() {
        tracing::info!(
            diagnostics = integration.diagnostics.len(),
            "model produced with diagnostics"
        );
    }
    Ok(())
}
