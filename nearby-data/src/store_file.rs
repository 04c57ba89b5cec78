//! Decoding of the JSON store export into a [`Catalog`].
//!
//! The export is a single object with a `stores` array. Coordinates are
//! required and may be JSON numbers or numeric strings; everything else is
//! optional. Entries that cannot be searched
//! (blank identifier, coordinates off the globe, repeated identifier) are
//! skipped with a warning so one bad row does not take the catalog down.

use std::{
    collections::HashSet,
    fmt,
    io::{BufReader, Read},
};

use camino::Utf8Path;
use geo::Coord;
use log::{info, warn};
use nearby_core::{Attributes, Catalog, LocationRecord, OpeningHours};
use serde::{
    Deserialize, Deserializer,
    de::{self, Unexpected},
};

use crate::{CatalogLoadError, open_utf8_file};

/// Top-level store export document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoreFile {
    /// Store entries in file order.
    pub stores: Vec<StoreEntry>,
}

/// One store as it appears in the export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEntry {
    /// Stable store identifier.
    pub uuid: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(deserialize_with = "deserialize_degrees")]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(deserialize_with = "deserialize_degrees")]
    pub longitude: f64,
    /// Opening time for today as `HH:MM`.
    pub today_open: Option<String>,
    /// Closing time for today as `HH:MM`.
    pub today_close: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// First street line.
    pub street: Option<String>,
    /// Second street line.
    pub street2: Option<String>,
    /// Third street line.
    pub street3: Option<String>,
    /// Display name of the address.
    pub address_name: Option<String>,
    /// Identifier of the shopping complex, if any.
    pub complex_number: Option<String>,
    /// Kind of location, e.g. `Supermarkt`.
    pub location_type: Option<String>,
    /// Legacy ERP identifier.
    #[serde(rename = "sapStoreID")]
    pub sap_store_id: Option<String>,
    /// Whether clients should show a warning banner for the store.
    #[serde(default)]
    pub show_warning_message: bool,
    /// Whether the store is a parcel collection point.
    #[serde(default)]
    pub collection_point: bool,
}

/// A coordinate as exported: some feeds quote their numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn deserialize_degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(raw) => raw
            .trim()
            .parse()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&raw), &"decimal degrees")),
    }
}

/// Why an entry was left out of the catalog.
#[derive(Debug, Clone, PartialEq)]
enum SkipReason {
    BlankId,
    CoordinatesOutOfRange { latitude: f64, longitude: f64 },
    DuplicateId(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankId => f.write_str("blank uuid"),
            Self::CoordinatesOutOfRange {
                latitude,
                longitude,
            } => write!(f, "coordinates ({latitude}, {longitude}) out of range"),
            Self::DuplicateId(id) => write!(f, "duplicate uuid '{id}'"),
        }
    }
}

impl StoreEntry {
    /// Parsed opening window; blank or malformed times become unknown.
    #[must_use]
    pub fn hours(&self) -> OpeningHours {
        OpeningHours::parse(self.today_open.as_deref(), self.today_close.as_deref())
    }

    /// Display fields keyed by their export names. Blank strings are omitted.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let text = [
            ("city", &self.city),
            ("postalCode", &self.postal_code),
            ("street", &self.street),
            ("street2", &self.street2),
            ("street3", &self.street3),
            ("addressName", &self.address_name),
            ("complexNumber", &self.complex_number),
            ("locationType", &self.location_type),
            ("sapStoreID", &self.sap_store_id),
        ];
        let mut attributes: Attributes = text
            .into_iter()
            .filter_map(|(key, value)| {
                let trimmed = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
                Some((key.to_owned(), trimmed.to_owned()))
            })
            .collect();
        attributes.insert(
            "showWarningMessage".to_owned(),
            self.show_warning_message.to_string(),
        );
        attributes.insert(
            "collectionPoint".to_owned(),
            self.collection_point.to_string(),
        );
        attributes
    }

    fn into_record(self) -> Result<LocationRecord, SkipReason> {
        let id = self
            .uuid
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(SkipReason::BlankId)?
            .to_owned();
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(SkipReason::CoordinatesOutOfRange {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        let location = Coord {
            x: self.longitude,
            y: self.latitude,
        };
        Ok(LocationRecord::new(
            id,
            location,
            self.hours(),
            self.attributes(),
        ))
    }
}

impl StoreFile {
    /// Convert the export into a catalog, skipping unusable entries.
    ///
    /// `origin` names the source in log messages.
    #[must_use]
    pub fn into_catalog(self, origin: &str) -> Catalog {
        let total = self.stores.len();
        let mut seen = HashSet::with_capacity(total);
        let records: Vec<LocationRecord> = self
            .stores
            .into_iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                let accepted = entry.into_record().and_then(|record| {
                    if seen.insert(record.id.clone()) {
                        Ok(record)
                    } else {
                        Err(SkipReason::DuplicateId(record.id))
                    }
                });
                accepted
                    .map_err(|reason| warn!("skipping store #{position} in {origin}: {reason}"))
                    .ok()
            })
            .collect();
        info!("loaded {} of {total} stores from {origin}", records.len());
        Catalog::new(records)
    }
}

/// Decode a store export from `reader`.
///
/// `origin` describes the source for errors and logs.
///
/// # Errors
/// Returns [`CatalogLoadError::Parse`] when the payload is not a store
/// export.
///
/// # Examples
/// ```
/// use nearby_core::LocationCatalog;
/// use nearby_data::read_catalog;
///
/// let json = r#"{"stores":[{"uuid":"a","latitude":52.1,"longitude":5.1,
///     "todayOpen":"08:00","todayClose":"21:00"}]}"#;
/// let catalog = read_catalog(json.as_bytes(), "inline")?;
/// assert_eq!(catalog.len(), 1);
/// # Ok::<(), nearby_data::CatalogLoadError>(())
/// ```
pub fn read_catalog<R: Read>(reader: R, origin: &str) -> Result<Catalog, CatalogLoadError> {
    let file: StoreFile = serde_json::from_reader(BufReader::new(reader)).map_err(|source| {
        CatalogLoadError::Parse {
            origin: origin.to_owned(),
            source,
        }
    })?;
    Ok(file.into_catalog(origin))
}

/// Load the store export at `path`.
///
/// # Errors
/// Returns [`CatalogLoadError::Open`] when the file cannot be opened and
/// [`CatalogLoadError::Parse`] when its contents are not a store export.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use nearby_core::LocationCatalog;
/// use nearby_data::load_catalog;
///
/// let catalog = load_catalog(Utf8Path::new("stores.json"))?;
/// println!("{} stores", catalog.len());
/// # Ok::<(), nearby_data::CatalogLoadError>(())
/// ```
pub fn load_catalog(path: &Utf8Path) -> Result<Catalog, CatalogLoadError> {
    let file = open_utf8_file(path).map_err(|source| CatalogLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_catalog(file, path.as_str())
}
