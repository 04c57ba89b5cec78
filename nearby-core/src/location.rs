use std::collections::BTreeMap;

use chrono::NaiveTime;
use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::OpeningHours;

/// Free-form display attributes such as city or street lines.
///
/// The engine never interprets these values.
pub type Attributes = BTreeMap<String, String>;

/// A known physical location.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Records are
/// owned by a [`Catalog`](crate::Catalog) and treated as read-only by the
/// search strategies.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearby_core::{LocationRecord, OpeningHours};
///
/// let record = LocationRecord::without_attributes(
///     "store-1",
///     Coord { x: 4.8952, y: 52.3702 },
///     OpeningHours::parse(Some("08:00"), Some("22:00")),
/// );
///
/// assert_eq!(record.latitude(), 52.3702);
/// assert!(record.attributes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Today's opening window.
    pub hours: OpeningHours,
    /// Display attributes carried through to callers untouched.
    pub attributes: Attributes,
}

impl LocationRecord {
    /// Construct a `LocationRecord`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        location: Coord<f64>,
        hours: OpeningHours,
        attributes: Attributes,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            hours,
            attributes,
        }
    }

    /// Construct a `LocationRecord` without display attributes.
    #[must_use]
    pub fn without_attributes(
        id: impl Into<String>,
        location: Coord<f64>,
        hours: OpeningHours,
    ) -> Self {
        Self::new(id, location, hours, Attributes::new())
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Whether the location is open at `now`.
    #[must_use]
    pub fn is_open_at(&self, now: NaiveTime) -> bool {
        self.hours.is_open_at(now)
    }
}
