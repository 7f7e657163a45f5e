//! Error type shared by the catalog pipeline and the locale scheduler.

use std::fmt;
use std::path::PathBuf;

/// What: Failure modes of a catalog synchronization run.
///
/// Inputs: Generated by the loader, the translation requester, the
/// configuration layer and the scheduler.
///
/// Output: Implements `Display`/`Error` for ergonomic propagation.
///
/// Details:
/// - Per-locale variants (`CatalogRead`, `CatalogWrite`, `TranslationService`,
///   `Parse`, `Cancelled`) are caught at the locale boundary and reported.
/// - `Configuration` only occurs before any locale work begins.
#[derive(Debug)]
pub enum SyncError {
    /// Catalog file missing, unreadable, or not a valid catalog object.
    CatalogRead {
        /// Catalog file that failed to load.
        path: PathBuf,
        /// Human readable cause.
        detail: String,
    },
    /// Catalog could not be written back to disk.
    CatalogWrite {
        /// Catalog file that failed to persist.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Network, authentication or service-side failure.
    TranslationService(String),
    /// Service response was not recoverable as a JSON object.
    Parse(String),
    /// Missing credential or invalid configuration.
    Configuration(String),
    /// Work was interrupted by a shutdown request.
    Cancelled,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatalogRead { path, detail } => {
                write!(f, "failed to read catalog {}: {detail}", path.display())
            }
            Self::CatalogWrite { path, source } => {
                write!(f, "failed to write catalog {}: {source}", path.display())
            }
            Self::TranslationService(msg) => write!(f, "translation service error: {msg}"),
            Self::Parse(msg) => write!(f, "unable to parse service response: {msg}"),
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogWrite { source, .. } => Some(source),
            Self::CatalogRead { .. }
            | Self::TranslationService(_)
            | Self::Parse(_)
            | Self::Configuration(_)
            | Self::Cancelled => None,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(value: reqwest::Error) -> Self {
        Self::TranslationService(value.to_string())
    }
}
