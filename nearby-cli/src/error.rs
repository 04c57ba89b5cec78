//! Error types emitted by the nearby CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use nearby_core::SearchRequestError;
use nearby_data::CatalogLoadError;
use thiserror::Error;

/// Errors emitted by the nearby CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The catalog path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// The catalog path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// The catalog path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// `--limit` exceeds the accepted maximum.
    #[error("limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge {
        /// Requested limit.
        limit: usize,
        /// Largest accepted limit.
        max: usize,
    },
    /// `--at` was not a valid `HH:MM` time.
    #[error("invalid --at time {value:?}; expected HH:MM")]
    InvalidTime {
        /// Raw value supplied.
        value: String,
    },
    /// The search parameters failed validation.
    #[error("invalid search request: {0}")]
    InvalidRequest(#[from] SearchRequestError),
    /// The catalog could not be loaded.
    #[error(transparent)]
    LoadCatalog(#[from] CatalogLoadError),
    /// Serialising the search results failed.
    #[error("failed to serialise search results: {0}")]
    SerialiseResults(#[source] serde_json::Error),
    /// Writing the search output failed.
    #[error("failed to write search output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
