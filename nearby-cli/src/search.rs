//! Search command implementation for the nearby CLI.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveTime};
use clap::Parser;
use geo::Coord;
use log::info;
use nearby_core::{
    Attributes, SearchRequest, SearchResult, SearchStrategy, build_search, parse_time_of_day,
};
use nearby_data::load_catalog;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_AT, ARG_CATALOG, ARG_LATITUDE, ARG_LONGITUDE, CliError, DEFAULT_LIMIT,
    DEFAULT_RADIUS_KM, ENV_CATALOG, ENV_LATITUDE, ENV_LONGITUDE, MAX_LIMIT,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the stores in a JSON catalog by great-circle distance \
                 from a coordinate. Options can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Find the nearest stores to a coordinate"
)]
#[ortho_config(prefix = "NEARBY")]
pub(crate) struct SearchArgs {
    /// Path to the JSON store export.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Search strategy (`linear` or `spatial-index`).
    #[arg(long, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
    /// Latitude of the search centre in decimal degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the search centre in decimal degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Maximum distance from the centre in kilometres.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) radius_km: Option<f64>,
    /// Maximum number of results to return.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Only return stores open at the query time.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "bool")]
    #[serde(default)]
    pub(crate) only_open: Option<bool>,
    /// Query time as `HH:MM`; defaults to the local clock.
    #[arg(long = ARG_AT, value_name = "HH:MM")]
    #[serde(default)]
    pub(crate) at: Option<String>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchConfig {
    /// Path to the JSON store export.
    pub(crate) catalog: Utf8PathBuf,
    /// Strategy answering the query.
    pub(crate) strategy: SearchStrategy,
    /// Validated query parameters.
    pub(crate) request: SearchRequest,
    /// Fixed query time; `None` samples the local clock.
    pub(crate) at: Option<NaiveTime>,
}

impl SearchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.catalog, ARG_CATALOG)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match nearby_data::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_CATALOG,
        })?;
        let latitude = args.latitude.ok_or(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: ENV_LATITUDE,
        })?;
        let longitude = args.longitude.ok_or(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: ENV_LONGITUDE,
        })?;

        let strategy = args
            .strategy
            .as_deref()
            .map_or_else(SearchStrategy::default, SearchStrategy::from_setting);

        let limit = args.limit.unwrap_or(DEFAULT_LIMIT);
        if limit > MAX_LIMIT {
            return Err(CliError::LimitTooLarge {
                limit,
                max: MAX_LIMIT,
            });
        }

        let at = args
            .at
            .map(|value| parse_time_of_day(&value).ok_or(CliError::InvalidTime { value }))
            .transpose()?;

        let request = SearchRequest::new(
            Coord {
                x: longitude,
                y: latitude,
            },
            args.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
            limit,
            args.only_open.unwrap_or(false),
        );
        request.validate()?;

        Ok(Self {
            catalog,
            strategy,
            request,
            at,
        })
    }
}

/// One search hit as written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NearbyLocation<'a> {
    pub(crate) id: &'a str,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) distance_km: f64,
    pub(crate) today_open: Option<String>,
    pub(crate) today_close: Option<String>,
    pub(crate) open: bool,
    pub(crate) attributes: &'a Attributes,
}

impl<'a> NearbyLocation<'a> {
    fn from_result(result: &SearchResult<'a>, now: NaiveTime) -> Self {
        let record = result.record;
        let format = |time: NaiveTime| time.format("%H:%M").to_string();
        Self {
            id: &record.id,
            latitude: record.latitude(),
            longitude: record.longitude(),
            distance_km: result.distance_km,
            today_open: record.hours.open.map(format),
            today_close: record.hours.close.map(format),
            open: record.is_open_at(now),
            attributes: &record.attributes,
        }
    }
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_search_with(args, &mut stdout)
}

pub(crate) fn run_search_with(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_search_config(args)?;
    let now = config.at.unwrap_or_else(|| Local::now().time());
    execute_search(&config, now, writer)
}

fn resolve_search_config(args: SearchArgs) -> Result<SearchConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn execute_search(
    config: &SearchConfig,
    now: NaiveTime,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let catalog = load_catalog(&config.catalog)?;
    let request = &config.request;
    info!(
        "finding nearby stores: lat={}, lon={}, radius={} km, limit={}, only_open={}, at={}",
        request.center.y,
        request.center.x,
        request.max_radius_km,
        request.limit,
        request.only_open,
        now.format("%H:%M")
    );
    let search = build_search(config.strategy, &catalog);
    let results = search.search(request, now);
    info!("found {} nearby stores", results.len());

    let locations: Vec<NearbyLocation<'_>> = results
        .iter()
        .map(|result| NearbyLocation::from_result(result, now))
        .collect();
    write_search_response(writer, &locations)
}

fn write_search_response(
    writer: &mut dyn Write,
    locations: &[NearbyLocation<'_>],
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(locations).map_err(CliError::SerialiseResults)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
