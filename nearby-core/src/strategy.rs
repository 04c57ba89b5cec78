//! Start-up selection of the nearby-search implementation.

use std::{fmt, str::FromStr};

use log::{info, warn};
use thiserror::Error;

use crate::{LinearSearch, LocationCatalog, NearbySearch, SpatialIndexSearch};

/// The available [`NearbySearch`] implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchStrategy {
    /// Full scan of the catalog per query.
    Linear,
    /// Expanding-ring search over an R\*-tree.
    #[default]
    SpatialIndex,
}

/// Error returned when a strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search strategy '{0}'")]
pub struct UnknownStrategy(pub String);

impl SearchStrategy {
    /// Resolve a configured strategy name, falling back to
    /// [`SearchStrategy::SpatialIndex`] with a warning when the name is not
    /// recognised.
    ///
    /// # Examples
    /// ```
    /// use nearby_core::SearchStrategy;
    ///
    /// assert_eq!(SearchStrategy::from_setting("in-memory"), SearchStrategy::Linear);
    /// assert_eq!(SearchStrategy::from_setting("bogus"), SearchStrategy::SpatialIndex);
    /// ```
    #[must_use]
    pub fn from_setting(value: &str) -> Self {
        match value.parse() {
            Ok(strategy) => strategy,
            Err(err) => {
                let fallback = Self::default();
                warn!("{err}, defaulting to {fallback}");
                fallback
            }
        }
    }

    /// Canonical name of the strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::SpatialIndex => "spatial-index",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchStrategy {
    type Err = UnknownStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" | "in-memory" | "inmemory" => Ok(Self::Linear),
            "spatial-index" | "spatial" | "quadtree" | "quad-tree" | "rtree" => {
                Ok(Self::SpatialIndex)
            }
            _ => Err(UnknownStrategy(value.to_owned())),
        }
    }
}

/// Construct the [`NearbySearch`] implementation for `strategy`.
///
/// Index-based strategies build their index here, once, from the snapshot.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveTime;
/// use geo::Coord;
/// use nearby_core::{Catalog, SearchRequest, SearchStrategy, build_search};
///
/// let catalog = Arc::new(Catalog::default());
/// let search = build_search(SearchStrategy::Linear, Arc::clone(&catalog));
/// let request = SearchRequest::new(Coord { x: 0.0, y: 0.0 }, 10.0, 5, false);
/// assert!(search.search(&request, NaiveTime::default()).is_empty());
/// ```
pub fn build_search<'a, C>(strategy: SearchStrategy, catalog: C) -> Box<dyn NearbySearch + 'a>
where
    C: LocationCatalog + Send + Sync + 'a,
{
    info!(
        "using {strategy} search strategy over {} locations",
        catalog.len()
    );
    match strategy {
        SearchStrategy::Linear => Box::new(LinearSearch::new(catalog)),
        SearchStrategy::SpatialIndex => Box::new(SpatialIndexSearch::new(catalog)),
    }
}
