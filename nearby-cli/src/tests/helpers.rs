//! Test helpers for writing catalogs and building search arguments.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

use crate::search::SearchArgs;

pub(super) const CATALOG_JSON: &str = r#"{
  "stores": [
    {
      "uuid": "A",
      "latitude": 0.0,
      "longitude": 0.05,
      "todayOpen": "08:00",
      "todayClose": "22:00",
      "city": "Alpha"
    },
    {
      "uuid": "B",
      "latitude": 0.0,
      "longitude": 0.20,
      "todayOpen": "08:00",
      "todayClose": "22:00"
    },
    {
      "uuid": "C",
      "latitude": 0.0,
      "longitude": 0.01
    }
  ]
}"#;

/// A temporary directory holding a catalog file.
pub(super) struct CatalogDir {
    _dir: TempDir,
    root: Utf8PathBuf,
    catalog: Utf8PathBuf,
}

impl CatalogDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let catalog = root.join("stores.json");
        write_utf8(&catalog, CATALOG_JSON.as_bytes());
        Self {
            _dir: dir,
            root,
            catalog,
        }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn catalog(&self) -> &Utf8Path {
        &self.catalog
    }

    /// Arguments for a search at the origin against this catalog.
    pub(super) fn args(&self) -> SearchArgs {
        SearchArgs {
            catalog: Some(self.catalog.clone()),
            latitude: Some(0.0),
            longitude: Some(0.0),
            ..SearchArgs::default()
        }
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write file");
}
