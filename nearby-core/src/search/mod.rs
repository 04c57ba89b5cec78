//! Nearby-search contract shared by every strategy.
//!
//! A strategy turns a [`SearchRequest`] and the caller's current time into an
//! ordered list of [`SearchResult`] values: nearest first, never further than
//! the requested radius, never longer than the requested limit.

use chrono::NaiveTime;
use geo::Coord;
use thiserror::Error;

use crate::{LocationRecord, distance_between};

mod linear;
mod spatial;

pub use linear::LinearSearch;
pub use spatial::{
    INITIAL_RING_RADIUS_KM, KM_PER_DEGREE, RingTrace, SpatialIndexSearch, degree_delta,
};

/// Parameters for a single nearby query.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use nearby_core::SearchRequest;
///
/// let request = SearchRequest::new(Coord { x: 4.8952, y: 52.3702 }, 25.0, 5, true);
/// assert!(request.validate().is_ok());
/// assert_eq!(request.limit, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    /// Query centre (`x = longitude`, `y = latitude`).
    pub center: Coord<f64>,
    /// Maximum great-circle distance of any result, in kilometres.
    pub max_radius_km: f64,
    /// Maximum number of results.
    pub limit: usize,
    /// Only return locations open at the supplied time.
    pub only_open: bool,
}

/// Reasons a [`SearchRequest`] is rejected by [`SearchRequest::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SearchRequestError {
    /// Latitude was outside `[-90, 90]`.
    #[error("latitude {0} must be between -90 and 90")]
    LatitudeOutOfRange(f64),
    /// Longitude was outside `[-180, 180]`.
    #[error("longitude {0} must be between -180 and 180")]
    LongitudeOutOfRange(f64),
    /// Radius was not a finite, positive number of kilometres.
    #[error("maximum radius {0} km must be a positive, finite number")]
    InvalidRadius(f64),
    /// Limit was zero.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

impl SearchRequest {
    /// Construct a request.
    #[must_use]
    pub const fn new(
        center: Coord<f64>,
        max_radius_km: f64,
        limit: usize,
        only_open: bool,
    ) -> Self {
        Self {
            center,
            max_radius_km,
            limit,
            only_open,
        }
    }

    /// Check the request bounds.
    ///
    /// Strategies do not call this; the boundary layer is expected to
    /// validate before searching. Out-of-range requests never panic a
    /// strategy but produce meaningless results.
    ///
    /// # Errors
    /// Returns a [`SearchRequestError`] naming the first bound that is
    /// violated: latitude, longitude, radius, then limit.
    pub fn validate(&self) -> Result<(), SearchRequestError> {
        if !(-90.0..=90.0).contains(&self.center.y) {
            return Err(SearchRequestError::LatitudeOutOfRange(self.center.y));
        }
        if !(-180.0..=180.0).contains(&self.center.x) {
            return Err(SearchRequestError::LongitudeOutOfRange(self.center.x));
        }
        if !self.max_radius_km.is_finite() || self.max_radius_km <= 0.0 {
            return Err(SearchRequestError::InvalidRadius(self.max_radius_km));
        }
        if self.limit == 0 {
            return Err(SearchRequestError::ZeroLimit);
        }
        Ok(())
    }

    /// Whether `record` passes the availability filter at `now`.
    fn admits(&self, record: &LocationRecord, now: NaiveTime) -> bool {
        !self.only_open || record.is_open_at(now)
    }

    fn score<'a>(&self, record: &'a LocationRecord) -> SearchResult<'a> {
        SearchResult::new(record, distance_between(self.center, record.location))
    }
}

/// A catalog record paired with its distance from the query centre.
///
/// Distances live here rather than on the record so concurrent queries never
/// write to shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<'a> {
    /// The matching record, borrowed from the catalog.
    pub record: &'a LocationRecord,
    /// Great-circle distance from the query centre in kilometres.
    pub distance_km: f64,
}

impl<'a> SearchResult<'a> {
    /// Pair a record with its distance.
    #[must_use]
    pub const fn new(record: &'a LocationRecord, distance_km: f64) -> Self {
        Self {
            record,
            distance_km,
        }
    }
}

/// Find the catalog locations nearest to a point.
///
/// Implementations must be deterministic for a fixed catalog, request and
/// `now`, and must return results sorted by ascending distance with ties in
/// catalog order. They must be `Send + Sync` so one instance can serve
/// concurrent queries.
pub trait NearbySearch: Send + Sync {
    /// Run a query. `now` drives the availability filter.
    fn search(&self, request: &SearchRequest, now: NaiveTime) -> Vec<SearchResult<'_>>;
}

/// Apply the radius cut-off, order by distance and truncate to `limit`.
///
/// The sort is stable, so callers control tie-breaks through input order.
fn rank<'a>(mut results: Vec<SearchResult<'a>>, request: &SearchRequest) -> Vec<SearchResult<'a>> {
    results.retain(|result| result.distance_km <= request.max_radius_km);
    results.sort_by(|left, right| left.distance_km.total_cmp(&right.distance_km));
    results.truncate(request.limit);
    results
}
