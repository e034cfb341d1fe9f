#![deny(missing_docs)]

//! # Document Source Arguments
//!
//! Arguments shared by every command that ingests a document.

use std::future::Future;
use std::time::Duration;

use apiui_core::config::DEFAULT_FETCH_TIMEOUT;
use apiui_core::{try_integrate_with_cancel, IngestConfig, Integration};

use crate::error::CliResult;

/// Where to read the document from, and how.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// URL (`http`, `https`, `file`) or filesystem path of the OpenAPI document.
    pub locator: String,

    /// Seconds to wait for the document before giving up.
    #[clap(long, env = "APIUI_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Skip structural validation of the document.
    #[clap(long)]
    pub skip_validation: bool,
}

impl SourceArgs {
    /// Ingestion settings derived from the arguments.
    pub fn config(&self) -> IngestConfig {
        IngestConfig::default()
            .with_fetch_timeout(Duration::from_secs(self.timeout_secs))
            .with_validation(!self.skip_validation)
    }

    /// Runs the integration request, giving up when `cancel` completes.
    pub async fn integrate<F>(&self, cancel: F) -> CliResult<Integration>
    where
        F: Future<Output = ()>,
    {
        Ok(try_integrate_with_cancel(&self.locator, &self.config(), cancel).await?)
    }
}
