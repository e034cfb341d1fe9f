//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! These are the *fatal* outcomes of an integration request. Per-endpoint
//! anomalies never surface here; they are recorded as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s instead.

use derive_more::{Display, From};
use std::time::Duration;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document could not be retrieved from its locator.
    #[from(ignore)]
    #[display("Fetch Error: {locator}: {reason}")]
    Fetch {
        /// The locator that was requested.
        locator: String,
        /// Why retrieval failed.
        reason: String,
    },

    /// Retrieval did not finish within the configured bound.
    #[from(ignore)]
    #[display("Fetch timed out after {}s", _0.as_secs_f64())]
    Timeout(Duration),

    /// The caller cancelled the request before the document was retrieved.
    #[from(ignore)]
    #[display("Integration cancelled")]
    Cancelled,

    /// The document is neither valid YAML nor JSON.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// The document failed structural OpenAPI validation.
    #[from(ignore)]
    #[display("Validation Error: {_0}")]
    Validation(String),

    /// The version marker is missing or not one of `swagger: "2.0"` / `openapi: "3.0.0"`.
    #[from(ignore)]
    #[display("Unknown specification or version detected: {}", _0.as_deref().unwrap_or("<missing>"))]
    UnsupportedVersion(Option<String>),

    /// A section required to build the model is present but unusable.
    #[from(ignore)]
    #[display("Structure Error: {_0}")]
    Structure(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
