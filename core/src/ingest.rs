//! # Specification Ingestion
//!
//! Entry points of the crate. An integration request fetches a document,
//! validates and parses it, dispatches on its version and synthesizes the
//! [`ApiUiModel`].
//!
//! Fatal failures (fetch, parse, validation, unsupported version, unusable
//! server section) yield no model at all. Everything else is recorded as a
//! [`Diagnostic`] and the model is still produced.

use crate::config::IngestConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::AppResult;
use crate::loader::{fetch_document, Locator};
use crate::model::ApiUiModel;
use crate::oas::components::synthesize_components;
use crate::oas::document::{parse_document, Document, NormalizedSpec};
use crate::oas::models::synthesize_models;
use crate::oas::validation::validate_document;
use serde::Serialize;
use std::future::{pending, Future};

/// A synthesized model together with the anomalies met on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Integration {
    /// The synthesized model.
    pub model: ApiUiModel,
    /// Non-fatal anomalies, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl Integration {
    /// True when at least one endpoint or property was not fully synthesized.
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Integrates the document at `locator`, reporting failures on the log.
///
/// Resolves to `None` when no model could be produced.
pub async fn integrate(locator: &str, config: &IngestConfig) -> Option<Integration> {
    integrate_with_cancel(locator, config, pending()).await
}

/// Like [`integrate`], giving up as soon as `cancel` completes.
pub async fn integrate_with_cancel<F>(
    locator: &str,
    config: &IngestConfig,
    cancel: F,
) -> Option<Integration>
where
    F: Future<Output = ()>,
{
    match try_integrate_with_cancel(locator, config, cancel).await {
        Ok(integration) => Some(integration),
        Err(e) => {
            tracing::error!(%locator, error = %e, "integration failed");
            None
        }
    }
}

/// Integrates the document at `locator`, returning the fatal error if any.
pub async fn try_integrate(locator: &str, config: &IngestConfig) -> AppResult<Integration> {
    try_integrate_with_cancel(locator, config, pending()).await
}

/// Like [`try_integrate`], giving up as soon as `cancel` completes.
pub async fn try_integrate_with_cancel<F>(
    locator: &str,
    config: &IngestConfig,
    cancel: F,
) -> AppResult<Integration>
where
    F: Future<Output = ()>,
{
    let locator = Locator::parse(locator)?;
    tracing::debug!(%locator, "loading specification");
    let content = fetch_document(&locator, config.fetch_timeout, cancel).await?;
    integrate_str(&content, config)
}

/// Integrates an already retrieved document. Synchronous and deterministic.
pub fn integrate_str(content: &str, config: &IngestConfig) -> AppResult<Integration> {
    let root = parse_document(content)?;
    if config.validate {
        validate_document(&root)?;
    }
    let document = Document::from_value(root)?;
    tracing::debug!(version = document.version().token(), "detected specification");
    let spec = document.normalize()?;
    Ok(synthesize(&spec))
}

/// Runs model and component synthesis over a normalized document.
pub fn synthesize(spec: &NormalizedSpec) -> Integration {
    let mut diagnostics = Diagnostics::new();

    let models = synthesize_models(
        spec.schemas.as_ref(),
        spec.version.schema_prefix(),
        &mut diagnostics,
    );
    let components = synthesize_components(spec, models.as_deref(), &mut diagnostics);

    let model = ApiUiModel {
        specification_version: spec.version.token().to_string(),
        api_version: spec.metadata.api_version.clone(),
        title: spec.metadata.title.clone(),
        description: spec.metadata.description.clone(),
        server_url: spec.server.url.clone(),
        server_description: spec.server.description.clone(),
        api_models: models.unwrap_or_default(),
        dynamic_components: components,
        api_layout: Vec::new(),
    };

    tracing::debug!(
        models = model.api_models.len(),
        components = model.dynamic_components.len(),
        diagnostics = diagnostics.len(),
        "synthesized API UI model"
    );

    Integration {
        model,
        diagnostics: diagnostics.into_vec(),
    }
}
