//! # Document Loader
//!
//! Retrieves the raw text of a specification from a URL or the filesystem.
//! This is the only step of an integration request that may suspend; it is
//! bounded by a timeout and can be cancelled by the caller.

use crate::error::{AppError, AppResult};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where a specification document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// An `http(s)` URL.
    Remote(Url),
    /// A path on the local filesystem.
    Local(PathBuf),
}

impl Locator {
    /// Classifies a raw locator string.
    ///
    /// `http`/`https` URLs are remote, `file` URLs and anything that does not
    /// parse as a URL (including Windows drive paths) are local paths.
    pub fn parse(raw: &str) -> AppResult<Self> {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Remote(url)),
            Ok(url) if url.scheme() == "file" => url.to_file_path().map(Self::Local).map_err(|_| {
                AppError::Fetch {
                    locator: raw.to_string(),
                    reason: "file URL does not map to a local path".into(),
                }
            }),
            _ => Ok(Self::Local(PathBuf::from(raw))),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{}", url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads the document behind `locator`.
///
/// Resolves to [`AppError::Timeout`] once `timeout` elapses and to
/// [`AppError::Cancelled`] as soon as `cancel` completes, whichever comes
/// first. No retries.
pub async fn fetch_document<F>(locator: &Locator, timeout: Duration, cancel: F) -> AppResult<String>
where
    F: Future<Output = ()>,
{
    let read = async {
        match locator {
            Locator::Remote(url) => fetch_remote(url.clone(), timeout).await,
            Locator::Local(path) => tokio::fs::read_to_string(path).await.map_err(AppError::from),
        }
    };

    // Cancellation is checked first on every poll.
    tokio::select! {
        biased;
        _ = cancel => Err(AppError::Cancelled),
        result = tokio::time::timeout(timeout, read) => {
            result.map_err(|_| AppError::Timeout(timeout))?
        }
    }
}

async fn fetch_remote(url: Url, timeout: Duration) -> AppResult<String> {
    let locator = url.to_string();
    tracing::debug!(%locator, "fetching remote specification");

    let body = tokio::task::spawn_blocking(move || {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        let mut response = agent.get(url.as_str()).call()?;
        response.body_mut().read_to_string()
    })
    .await
    .map_err(|e| AppError::General(format!("Fetch task failed: {}", e)))?;

    body.map_err(|e| AppError::Fetch {
        locator,
        reason: e.to_string(),
    })
}
