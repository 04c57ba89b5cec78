//! Criterion benchmarks comparing the nearby-search strategies.
//!
//! Measures query latency across catalog sizes (1k, 10k, 50k locations) for
//! the linear scan and the expanding-ring spatial index. Index construction
//! happens outside the measured loop.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package nearby-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use chrono::NaiveTime;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;
use nearby_core::{
    Catalog, LinearSearch, LocationRecord, NearbySearch, OpeningHours, SearchRequest,
    SpatialIndexSearch,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic catalog generation.
const BENCHMARK_SEED: u64 = 42;

/// Catalog sizes to benchmark.
const CATALOG_SIZES: &[usize] = &[1_000, 10_000, 50_000];

/// Number of cluster centres, roughly one per town.
const CLUSTER_COUNT: usize = 20;

/// Spread of locations around a cluster centre, in degrees (~5 km).
const CLUSTER_SPREAD: f64 = 0.05;

/// Area over which cluster centres are scattered, in degrees (~500 km).
const AREA_SIZE: f64 = 5.0;

/// Generate a clustered catalog with a mix of daytime and overnight hours.
fn generate_clustered_catalog(count: usize, seed: u64) -> Catalog {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let centres: Vec<Coord<f64>> = (0..CLUSTER_COUNT)
        .map(|_| Coord {
            x: rng.gen_range(0.0..AREA_SIZE),
            y: rng.gen_range(45.0..45.0 + AREA_SIZE),
        })
        .collect();
    let daytime = OpeningHours::parse(Some("08:00"), Some("22:00"));
    let overnight = OpeningHours::parse(Some("20:00"), Some("06:00"));

    (0..count)
        .map(|i| {
            #[expect(
                clippy::integer_division_remainder_used,
                reason = "Modulo for cyclic cluster assignment is intentional"
            )]
            let centre = centres
                .get(i % CLUSTER_COUNT)
                .copied()
                .unwrap_or(Coord { x: 0.0, y: 45.0 });
            let dx: f64 = rng.gen_range(-CLUSTER_SPREAD..CLUSTER_SPREAD);
            let dy: f64 = rng.gen_range(-CLUSTER_SPREAD..CLUSTER_SPREAD);
            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let location = Coord {
                x: centre.x + dx,
                y: centre.y + dy,
            };
            let hours = if rng.gen_bool(0.8) { daytime } else { overnight };
            LocationRecord::without_attributes(format!("store-{i}"), location, hours)
        })
        .collect()
}

/// Query centred on the first cluster, asking for the five nearest open
/// locations within 50 km.
fn benchmark_request(catalog: &Catalog) -> SearchRequest {
    let center = catalog
        .iter()
        .next()
        .map_or(Coord { x: 0.0, y: 45.0 }, |record| record.location);
    SearchRequest::new(center, 50.0, 5, true)
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearby_search");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();

    for &size in CATALOG_SIZES {
        let catalog = generate_clustered_catalog(size, BENCHMARK_SEED);
        let request = benchmark_request(&catalog);
        let linear = LinearSearch::new(&catalog);
        let spatial = SpatialIndexSearch::new(&catalog);

        #[expect(clippy::as_conversions, reason = "Catalog sizes fit in u64")]
        let throughput_size = size as u64;
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("linear", size), &size, |b, _| {
            b.iter(|| linear.search(&request, noon).len());
        });
        group.bench_with_input(BenchmarkId::new("spatial_index", size), &size, |b, _| {
            b.iter(|| spatial.search(&request, noon).len());
        });
    }

    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(20);

    for &size in CATALOG_SIZES {
        let catalog = generate_clustered_catalog(size, BENCHMARK_SEED);
        group.bench_with_input(BenchmarkId::new("locations", size), &size, |b, _| {
            b.iter(|| SpatialIndexSearch::new(&catalog).indexed_len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_index_build);
criterion_main!(benches);
