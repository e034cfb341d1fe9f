#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use apiui_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper (writing the report).
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// The model could not be serialized.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// The integration request produced no model.
    #[display("{}", _0)]
    Integration(AppError),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
