//! Expanding-ring strategy backed by an R\*-tree.
//!
//! The index is bulk loaded once from the catalog and never mutated, so a
//! single instance can serve concurrent queries without locking.
//!
//! Ring radii are converted to degrees with a flat-earth factor of
//! [`KM_PER_DEGREE`]. The square query box is accurate to a few percent at
//! mid latitudes; towards the poles a degree of longitude shrinks and the box
//! under-covers the true circle east and west of the centre. Exact distances
//! are always recomputed before ranking, so the approximation only affects
//! which candidates are considered, never the reported distances. Boxes that
//! cross the antimeridian are not wrapped.

use std::{cmp::Ordering, collections::BTreeSet, fmt};

use chrono::NaiveTime;
use geo::Coord;
use log::{debug, warn};
use rstar::{AABB, RTree, RTreeObject};

use super::{NearbySearch, SearchRequest, SearchResult, rank};
use crate::LocationCatalog;

/// Radius of the first ring, in kilometres.
pub const INITIAL_RING_RADIUS_KM: f64 = 1.0;

/// Flat-earth conversion factor from kilometres to degrees.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Half-width in degrees of the square query box for a ring radius.
///
/// # Examples
/// ```
/// use nearby_core::degree_delta;
///
/// assert_eq!(degree_delta(111.0), 1.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "km to degree conversion")]
pub fn degree_delta(radius_km: f64) -> f64 {
    radius_km / KM_PER_DEGREE
}

/// Point entry stored in the R\*-tree: a position and the record's slot in
/// the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedLocation {
    position: [f64; 2],
    slot: usize,
}

impl RTreeObject for IndexedLocation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// How far the ring expanded while answering a query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RingTrace {
    /// Number of index queries issued.
    pub rings_queried: u32,
    /// Radius of the last ring queried, in kilometres.
    pub final_radius_km: f64,
    /// Distinct candidates gathered before exact filtering.
    pub candidates: usize,
}

/// Spatial-index [`NearbySearch`] implementation.
///
/// Starting at [`INITIAL_RING_RADIUS_KM`], each query doubles the ring until
/// it has gathered at least `limit` candidates or the ring radius reaches the
/// request's maximum. Candidates are then scored with the exact great-circle
/// distance, cut at the maximum radius, sorted and truncated.
///
/// # Examples
/// ```rust
/// use chrono::NaiveTime;
/// use geo::Coord;
/// use nearby_core::{
///     Catalog, LocationRecord, NearbySearch, OpeningHours, SearchRequest, SpatialIndexSearch,
/// };
///
/// let catalog = Catalog::new(vec![
///     LocationRecord::without_attributes("near", Coord { x: 0.01, y: 0.0 }, OpeningHours::CLOSED),
///     LocationRecord::without_attributes("far", Coord { x: 0.30, y: 0.0 }, OpeningHours::CLOSED),
/// ]);
/// let search = SpatialIndexSearch::new(catalog);
/// let request = SearchRequest::new(Coord { x: 0.0, y: 0.0 }, 50.0, 1, false);
///
/// let results = search.search(&request, NaiveTime::default());
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].record.id, "near");
/// ```
pub struct SpatialIndexSearch<C> {
    catalog: C,
    index: RTree<IndexedLocation>,
}

impl<C> fmt::Debug for SpatialIndexSearch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndexSearch")
            .field("entries", &self.index.size())
            .finish_non_exhaustive()
    }
}

impl<C: LocationCatalog> SpatialIndexSearch<C> {
    /// Build the index from a catalog snapshot.
    ///
    /// Records with non-finite coordinates cannot lie within any radius and
    /// are left out of the index.
    pub fn new(catalog: C) -> Self {
        let entries: Vec<IndexedLocation> = catalog
            .locations()
            .iter()
            .enumerate()
            .filter_map(|(slot, record)| {
                let Coord { x, y } = record.location;
                if x.is_finite() && y.is_finite() {
                    Some(IndexedLocation {
                        position: [x, y],
                        slot,
                    })
                } else {
                    warn!(
                        "location {} has non-finite coordinates ({y}, {x}); not indexed",
                        record.id
                    );
                    None
                }
            })
            .collect();
        debug!(
            "spatial index built over {} of {} locations",
            entries.len(),
            catalog.len()
        );
        Self {
            catalog,
            index: RTree::bulk_load(entries),
        }
    }

    /// The catalog the index was built from.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Number of indexed locations.
    pub fn indexed_len(&self) -> usize {
        self.index.size()
    }

    /// Run a query and report how far the ring expanded.
    pub fn search_traced(
        &self,
        request: &SearchRequest,
        now: NaiveTime,
    ) -> (Vec<SearchResult<'_>>, RingTrace) {
        let mut trace = RingTrace::default();
        if self.index.size() == 0 {
            return (Vec::new(), trace);
        }

        let records = self.catalog.locations();
        // Slots keep catalog order so the stable sort breaks ties the same
        // way as the linear scan.
        let mut candidates = BTreeSet::new();
        let mut radius_km = INITIAL_RING_RADIUS_KM;
        loop {
            let ring = ring_envelope(request.center, radius_km);
            for entry in self.index.locate_in_envelope_intersecting(&ring) {
                if let Some(record) = records.get(entry.slot)
                    && request.admits(record, now)
                {
                    candidates.insert(entry.slot);
                }
            }
            trace.rings_queried = trace.rings_queried.saturating_add(1);
            trace.final_radius_km = radius_km;

            // A NaN radius compares as unordered and also stops the loop.
            let reached_max = radius_km.partial_cmp(&request.max_radius_km) != Some(Ordering::Less);
            if candidates.len() >= request.limit || reached_max {
                break;
            }
            radius_km = double(radius_km);
        }
        trace.candidates = candidates.len();
        debug!(
            "ring search stopped after {} rings at {} km with {} candidates",
            trace.rings_queried, trace.final_radius_km, trace.candidates
        );

        let scored = candidates
            .into_iter()
            .filter_map(|slot| records.get(slot))
            .map(|record| request.score(record))
            .collect();
        (rank(scored, request), trace)
    }
}

impl<C> NearbySearch for SpatialIndexSearch<C>
where
    C: LocationCatalog + Send + Sync,
{
    fn search(&self, request: &SearchRequest, now: NaiveTime) -> Vec<SearchResult<'_>> {
        self.search_traced(request, now).0
    }
}

#[expect(clippy::float_arithmetic, reason = "ring radius doubling")]
fn double(radius_km: f64) -> f64 {
    radius_km * 2.0
}

/// Square box of half-width `radius_km` (in degrees) around `center`.
#[expect(clippy::float_arithmetic, reason = "box corners offset the centre")]
fn ring_envelope(center: Coord<f64>, radius_km: f64) -> AABB<[f64; 2]> {
    let delta = degree_delta(radius_km);
    AABB::from_corners(
        [center.x - delta, center.y - delta],
        [center.x + delta, center.y + delta],
    )
}
