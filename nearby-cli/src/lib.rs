//! Command-line interface for querying a store catalog by proximity.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod search;

pub use error::CliError;
use search::{SearchArgs, run_search};

pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_AT: &str = "at";
pub(crate) const ENV_CATALOG: &str = "NEARBY_CMDS_SEARCH_CATALOG";
pub(crate) const ENV_LATITUDE: &str = "NEARBY_CMDS_SEARCH_LATITUDE";
pub(crate) const ENV_LONGITUDE: &str = "NEARBY_CMDS_SEARCH_LONGITUDE";

/// Results returned when `--limit` is not given.
pub(crate) const DEFAULT_LIMIT: usize = 5;
/// Largest accepted `--limit`.
pub(crate) const MAX_LIMIT: usize = 50;
/// Search radius used when `--radius-km` is not given.
pub(crate) const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration or the catalog are
/// invalid, or when the results cannot be written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Search(args) => run_search(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "nearby",
    about = "Find the stores nearest to a point",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank catalog locations by distance from a coordinate.
    Search(SearchArgs),
}

#[cfg(test)]
mod tests;
