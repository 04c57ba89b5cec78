//! Facade crate for the nearby-location search engine.
//!
//! This crate re-exports the core search types and exposes the JSON catalog
//! loader behind the `catalog-json` feature.

#![forbid(unsafe_code)]

pub use nearby_core::{
    Attributes, Catalog, LinearSearch, LocationCatalog, LocationRecord, NearbySearch,
    OpeningHours, SearchRequest, SearchRequestError, SearchResult, SearchStrategy,
    SpatialIndexSearch, build_search, distance_km, is_open,
};

#[cfg(feature = "catalog-json")]
pub use nearby_data::{CatalogLoadError, load_catalog, read_catalog};
