//! # Diagnostics
//!
//! Non-fatal anomalies found while synthesizing a model. Each one is logged
//! as it is recorded and also handed back to the caller next to the model,
//! so a fully specified model can be told apart from a degraded one.

use derive_more::Display;
use serde::Serialize;

/// A per-endpoint or per-property anomaly that did not abort synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The path item declares a verb outside GET/POST/PUT/DELETE.
    #[display("Not supported HTTP method '{method}' on {path}")]
    UnsupportedMethod {
        /// Path template.
        path: String,
        /// Verb as declared.
        method: String,
    },

    /// A POST operation has neither `parameters` nor a usable `requestBody`.
    #[display("Can't generate dynamic component for endpoint {path}")]
    MissingRequestSchema {
        /// Path template.
        path: String,
    },

    /// A request body needs the model catalog but the schema section is absent.
    #[display("No schema definitions available to build the request body of {path}")]
    MissingModelCatalog {
        /// Path template.
        path: String,
    },

    /// A `$ref` could not be resolved with single-level resolution.
    #[display("Unresolved reference '{reference}' at {location}")]
    UnresolvedReference {
        /// Where the reference appeared (e.g. `Pet.tags` or `POST /pets`).
        location: String,
        /// The reference as written, or a short description of the nested shape.
        reference: String,
    },

    /// An operation object could not be read; its component carries no controls.
    #[display("Malformed {method} operation on {path}: {reason}")]
    MalformedOperation {
        /// Path template.
        path: String,
        /// Verb as declared.
        method: String,
        /// Deserialization failure.
        reason: String,
    },
}

/// Accumulates diagnostics for one integration request.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and reports it on the logging sink.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(target: "apiui::diagnostics", "{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Returns true when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Recorded diagnostics, in the order they occurred.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Consumes the collector.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
