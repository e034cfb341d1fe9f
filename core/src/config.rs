//! # Ingestion Configuration
//!
//! Knobs for the fetch/validate/parse boundary. Synthesis itself has no
//! configuration: the method policy and widget rules are fixed.

use std::time::Duration;

/// Default bound on retrieving a document.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one integration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestConfig {
    /// Upper bound on fetching the document (network or disk).
    pub fetch_timeout: Duration,
    /// Run structural validation before dispatching to a pipeline.
    pub validate: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            validate: true,
        }
    }
}

impl IngestConfig {
    /// Sets the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Enables or disables structural validation.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}
