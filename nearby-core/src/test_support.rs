//! Record builders shared by unit tests and downstream crates' tests.

use chrono::NaiveTime;
use geo::Coord;

use crate::{LocationRecord, OpeningHours};

/// Build a time of day, falling back to midnight for invalid input.
#[must_use]
pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Hours covering the whole day, open at every instant.
#[must_use]
pub fn all_day() -> OpeningHours {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default();
    OpeningHours::new(Some(time(0, 0)), Some(last_second))
}

/// A record at `(lat, lon)` with the given hours.
#[must_use]
pub fn record(id: &str, lat: f64, lon: f64, hours: OpeningHours) -> LocationRecord {
    LocationRecord::without_attributes(id, Coord { x: lon, y: lat }, hours)
}

/// A record that is open around the clock.
#[must_use]
pub fn open_record(id: &str, lat: f64, lon: f64) -> LocationRecord {
    record(id, lat, lon, all_day())
}

/// A record with unknown hours, which is never open.
#[must_use]
pub fn closed_record(id: &str, lat: f64, lon: f64) -> LocationRecord {
    record(id, lat, lon, OpeningHours::CLOSED)
}
