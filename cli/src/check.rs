#![deny(missing_docs)]

//! # Check Command
//!
//! Ingests a document and reports every diagnostic, one per line, followed by
//! a summary. Useful in CI to catch documents that only degrade silently.

use std::future::Future;
use std::io::Write;

use crate::error::CliResult;
use crate::source::SourceArgs;

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Document to check.
    #[clap(flatten)]
    pub source: SourceArgs,
}

/// Executes the check and writes the report to `out`.
///
/// Returns `true` when the model was produced without diagnostics.
pub async fn execute<F, W>(args: &CheckArgs, cancel: F, out: &mut W) -> CliResult<bool>
where
    F: Future<Output = ()>,
    W: Write,
{
    let integration = args.source.integrate(cancel).await?;

    for diagnostic in &integration.diagnostics {
        writeln!(out, "warning: {}", diagnostic)?;
    }

    let model = &integration.model;
    writeln!(
        out,
        "{}: OpenAPI {}, {} models, {} components, {} diagnostics",
        args.source.locator,
        model.specification_version,
        model.api_models.len(),
        model.dynamic_components.len(),
        integration.diagnostics.len()
    )?;

    Ok(!integration.is_degraded())
}
