//! Property-based tests for the nearby-search strategies.
//!
//! # Invariants tested
//!
//! - **Limit:** no strategy returns more than `limit` results.
//! - **Ordering:** results are sorted by ascending distance.
//! - **Radius:** every result lies within `max_radius_km`.
//! - **Availability:** with `only_open`, every result is open at `now`.
//! - **Equivalence:** when the limit covers the whole catalog, both
//!   strategies return the same identifiers in the same order.

use chrono::NaiveTime;
use geo::Coord;
use nearby_core::{
    Catalog, LinearSearch, LocationRecord, NearbySearch, OpeningHours, SearchRequest,
    SearchResult, SpatialIndexSearch,
};
use proptest::prelude::*;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Opening windows covering same-day, overnight and unknown hours.
fn hours_strategy() -> impl Strategy<Value = OpeningHours> {
    prop_oneof![
        Just(OpeningHours::new(Some(at(8, 0)), Some(at(22, 0)))),
        Just(OpeningHours::new(Some(at(22, 0)), Some(at(2, 0)))),
        Just(OpeningHours::new(Some(at(0, 0)), Some(at(23, 59)))),
        Just(OpeningHours::new(None, Some(at(18, 0)))),
        Just(OpeningHours::CLOSED),
    ]
}

/// Catalogs clustered near the equator, where the flat-earth ring box
/// always covers the true search circle.
fn catalog_strategy(max_len: usize) -> impl Strategy<Value = Catalog> {
    prop::collection::vec((-0.5_f64..0.5, -0.5_f64..0.5, hours_strategy()), 0..max_len).prop_map(
        |entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(idx, (lat, lon, hours))| {
                    LocationRecord::without_attributes(
                        format!("loc-{idx}"),
                        Coord { x: lon, y: lat },
                        hours,
                    )
                })
                .collect()
        },
    )
}

fn request_strategy(max_limit: usize) -> impl Strategy<Value = SearchRequest> {
    (
        -0.2_f64..0.2,
        -0.2_f64..0.2,
        0.5_f64..150.0,
        1..=max_limit,
        any::<bool>(),
    )
        .prop_map(|(lat, lon, radius, limit, only_open)| {
            SearchRequest::new(Coord { x: lon, y: lat }, radius, limit, only_open)
        })
}

fn now_strategy() -> impl Strategy<Value = NaiveTime> {
    (0_u32..24, 0_u32..60).prop_map(|(hour, minute)| at(hour, minute))
}

fn ids(results: &[SearchResult<'_>]) -> Vec<String> {
    results.iter().map(|result| result.record.id.clone()).collect()
}

fn check_contract(
    results: &[SearchResult<'_>],
    request: &SearchRequest,
    now: NaiveTime,
) -> Result<(), TestCaseError> {
    prop_assert!(results.len() <= request.limit);
    for pair in results.windows(2) {
        if let [left, right] = pair {
            prop_assert!(
                left.distance_km <= right.distance_km,
                "{} km listed before {} km",
                left.distance_km,
                right.distance_km
            );
        }
    }
    for result in results {
        prop_assert!(result.distance_km <= request.max_radius_km);
        if request.only_open {
            prop_assert!(result.record.is_open_at(now));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn linear_search_honours_contract(
        catalog in catalog_strategy(40),
        request in request_strategy(10),
        now in now_strategy(),
    ) {
        let search = LinearSearch::new(catalog);
        check_contract(&search.search(&request, now), &request, now)?;
    }

    #[test]
    fn spatial_search_honours_contract(
        catalog in catalog_strategy(40),
        request in request_strategy(10),
        now in now_strategy(),
    ) {
        let search = SpatialIndexSearch::new(catalog);
        check_contract(&search.search(&request, now), &request, now)?;
    }

    #[test]
    fn strategies_agree_when_limit_covers_catalog(
        catalog in catalog_strategy(30),
        mut request in request_strategy(1),
        now in now_strategy(),
    ) {
        request.limit = catalog.iter().count().max(1);
        let linear = LinearSearch::new(&catalog);
        let spatial = SpatialIndexSearch::new(&catalog);
        prop_assert_eq!(
            ids(&linear.search(&request, now)),
            ids(&spatial.search(&request, now))
        );
    }

    #[test]
    fn spatial_results_are_a_subset_of_linear_results(
        catalog in catalog_strategy(40),
        request in request_strategy(10),
        now in now_strategy(),
    ) {
        let linear = LinearSearch::new(&catalog);
        let spatial = SpatialIndexSearch::new(&catalog);
        let unlimited = SearchRequest { limit: usize::MAX, ..request };
        let every_match = ids(&linear.search(&unlimited, now));
        for id in ids(&spatial.search(&request, now)) {
            prop_assert!(every_match.contains(&id), "{id} is not a valid match");
        }
    }

    #[test]
    fn empty_catalog_yields_empty_results(
        request in request_strategy(10),
        now in now_strategy(),
    ) {
        let catalog = Catalog::default();
        prop_assert!(LinearSearch::new(&catalog).search(&request, now).is_empty());
        prop_assert!(SpatialIndexSearch::new(&catalog).search(&request, now).is_empty());
    }
}
