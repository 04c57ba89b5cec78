//! Brute-force strategy that scores every record on each query.

use chrono::NaiveTime;

use super::{NearbySearch, SearchRequest, SearchResult, rank};
use crate::LocationCatalog;

/// Full-scan [`NearbySearch`] implementation.
///
/// Costs `O(N log N)` per query and keeps no state beyond the catalog.
///
/// # Examples
/// ```rust
/// use chrono::NaiveTime;
/// use geo::Coord;
/// use nearby_core::{
///     Catalog, LinearSearch, LocationRecord, NearbySearch, OpeningHours, SearchRequest,
/// };
///
/// let catalog = Catalog::new(vec![LocationRecord::without_attributes(
///     "a",
///     Coord { x: 0.01, y: 0.0 },
///     OpeningHours::parse(Some("08:00"), Some("22:00")),
/// )]);
/// let search = LinearSearch::new(catalog);
/// let request = SearchRequest::new(Coord { x: 0.0, y: 0.0 }, 5.0, 1, true);
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
///
/// let results = search.search(&request, noon);
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LinearSearch<C> {
    catalog: C,
}

impl<C: LocationCatalog> LinearSearch<C> {
    /// Wrap a catalog snapshot.
    pub const fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// The catalog being scanned.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }
}

impl<C> NearbySearch for LinearSearch<C>
where
    C: LocationCatalog + Send + Sync,
{
    fn search(&self, request: &SearchRequest, now: NaiveTime) -> Vec<SearchResult<'_>> {
        let scored = self
            .catalog
            .locations()
            .iter()
            .filter(|record| request.admits(record, now))
            .map(|record| request.score(record))
            .collect();
        rank(scored, request)
    }
}
