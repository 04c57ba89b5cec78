//! Read-only access to the location snapshot.
//!
//! The [`LocationCatalog`] trait is the seam between the search strategies
//! and whatever loaded the records. [`Catalog`] is the owned, in-memory
//! snapshot handed to a strategy at start-up.

use std::sync::Arc;

use crate::LocationRecord;

/// Immutable snapshot of known locations.
///
/// Implementations must return the same slice for the lifetime of the
/// value; strategies index into it by position.
///
/// # Examples
///
/// ```rust
/// use nearby_core::{LocationCatalog, LocationRecord};
///
/// struct Fixed(Vec<LocationRecord>);
///
/// impl LocationCatalog for Fixed {
///     fn locations(&self) -> &[LocationRecord] {
///         &self.0
///     }
/// }
///
/// let catalog = Fixed(Vec::new());
/// assert!(catalog.is_empty());
/// ```
pub trait LocationCatalog {
    /// All records in catalog order.
    fn locations(&self) -> &[LocationRecord];

    /// Number of records.
    fn len(&self) -> usize {
        self.locations().len()
    }

    /// Whether the snapshot holds no records.
    fn is_empty(&self) -> bool {
        self.locations().is_empty()
    }
}

impl<C: LocationCatalog + ?Sized> LocationCatalog for Arc<C> {
    fn locations(&self) -> &[LocationRecord] {
        (**self).locations()
    }
}

impl<C: LocationCatalog + ?Sized> LocationCatalog for &C {
    fn locations(&self) -> &[LocationRecord] {
        (**self).locations()
    }
}

/// Owned catalog snapshot.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearby_core::{Catalog, LocationCatalog, LocationRecord, OpeningHours};
///
/// let catalog: Catalog = [LocationRecord::without_attributes(
///     "a",
///     Coord { x: 0.0, y: 0.0 },
///     OpeningHours::CLOSED,
/// )]
/// .into_iter()
/// .collect();
///
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.get("a").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<LocationRecord>,
}

impl Catalog {
    /// Wrap a list of records, preserving their order.
    #[must_use]
    pub const fn new(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    /// Look up a record by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LocationRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Iterate over the records in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, LocationRecord> {
        self.records.iter()
    }
}

impl LocationCatalog for Catalog {
    fn locations(&self) -> &[LocationRecord] {
        &self.records
    }
}

impl FromIterator<LocationRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = LocationRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a LocationRecord;
    type IntoIter = std::slice::Iter<'a, LocationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
