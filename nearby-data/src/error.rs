//! Errors produced while loading a store catalog.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned when a catalog cannot be supplied.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    /// The catalog file could not be opened.
    #[error("failed to open catalog at {path:?}: {source}")]
    Open {
        /// Path that was opened.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The catalog payload was not a valid store export.
    #[error("failed to parse catalog from {origin}: {source}")]
    Parse {
        /// Human-readable description of where the payload came from.
        origin: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
