//! Great-circle distance on a spherical Earth.
//!
//! Both search strategies score candidates through [`distance_km`], so they
//! agree on ordering for identical inputs.

use geo::Coord;

/// Mean Earth radius used for every distance in the engine, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
///
/// The result is exactly symmetric in its arguments and exactly zero for
/// identical points. The haversine term is clamped to `[0, 1]` before the
/// inverse sine so rounding near 0° or 180° separations cannot yield NaN.
///
/// # Examples
/// ```
/// use nearby_core::distance_km;
///
/// assert_eq!(distance_km(52.3702, 4.8952, 52.3702, 4.8952), 0.0);
///
/// let one_degree = distance_km(0.0, 0.0, 0.0, 1.0);
/// assert!((one_degree - 111.19).abs() < 0.01);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is floating-point trigonometry"
)]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // Absolute deltas keep the computation bit-for-bit symmetric.
    let half_dlat = ((lat2 - lat1).abs().to_radians() / 2.0).sin();
    let half_dlon = ((lon2 - lon1).abs().to_radians() / 2.0).sin();
    let haversine = half_dlat * half_dlat
        + lat1.to_radians().cos() * lat2.to_radians().cos() * half_dlon * half_dlon;
    let clamped = haversine.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * clamped.sqrt().asin()
}

/// Haversine distance in kilometres between two WGS84 coordinates.
///
/// Coordinates use `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearby_core::distance_between;
///
/// let amsterdam = Coord { x: 4.8952, y: 52.3702 };
/// let utrecht = Coord { x: 5.1214, y: 52.0907 };
/// let km = distance_between(amsterdam, utrecht);
/// assert!(km > 34.0 && km < 36.0);
/// ```
#[must_use]
pub fn distance_between(from: Coord<f64>, to: Coord<f64>) -> f64 {
    distance_km(from.y, from.x, to.y, to.x)
}
