//! Catalog loading for the nearby search engine.
//!
//! Responsibilities:
//! - Decode the JSON store export into a [`nearby_core::Catalog`].
//! - Drop unusable entries with a warning instead of failing the whole load.
//! - Open files through capability-based IO.
//!
//! Boundaries:
//! - Do not encode search rules (live in `nearby-core`).
//! - Loading happens once at start-up; the catalog is immutable afterwards.

#![forbid(unsafe_code)]

mod error;
mod fs;
mod store_file;

pub use error::CatalogLoadError;
pub use fs::{file_is_file, open_utf8_file};
pub use store_file::{StoreEntry, StoreFile, load_catalog, read_catalog};
