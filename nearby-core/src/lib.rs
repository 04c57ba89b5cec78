//! Proximity search over a static catalog of physical locations.
//!
//! The crate answers "which known locations are nearest to this point",
//! optionally restricted to those open at a caller-supplied time, within a
//! radius and capped at a result count. Two interchangeable strategies
//! implement [`NearbySearch`]: a [`LinearSearch`] full scan and a
//! [`SpatialIndexSearch`] expanding-ring query over an R\*-tree. Pick one at
//! start-up with [`SearchStrategy`] and [`build_search`].
//!
//! Records are never mutated by a query; distances are returned alongside
//! borrowed records in [`SearchResult`].

#![forbid(unsafe_code)]

mod catalog;
mod geo_math;
mod hours;
mod location;
pub mod search;
mod strategy;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{Catalog, LocationCatalog};
pub use geo_math::{EARTH_RADIUS_KM, distance_between, distance_km};
pub use hours::{OpeningHours, is_open, parse_time_of_day};
pub use location::{Attributes, LocationRecord};
pub use search::{
    LinearSearch, NearbySearch, RingTrace, SearchRequest, SearchRequestError, SearchResult,
    SpatialIndexSearch, degree_delta,
};
pub use strategy::{SearchStrategy, UnknownStrategy, build_search};
