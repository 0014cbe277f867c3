//! Airport lookup command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use flightpath_lib::routing::resolve_location;

use super::load_dataset;
use crate::output::{render_airport, OutputFormat};

/// Arguments for the airport command.
#[derive(Debug, Clone, Args)]
pub struct AirportArgs {
    /// IATA or ICAO code to look up.
    pub code: String,
}

/// Print the details of one airport.
pub fn handle_airport_command(
    data_dir: Option<&Path>,
    format: OutputFormat,
    args: &AirportArgs,
) -> Result<()> {
    let network = load_dataset(data_dir)?;
    let id = resolve_location(&network, &args.code)?;
    let location = network
        .location(id)
        .with_context(|| format!("airport {id} missing from network"))?;
    render_airport(location, format).context("failed to write output")
}
