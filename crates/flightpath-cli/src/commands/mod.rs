// Each module handles one CLI subcommand; main.rs only parses and dispatches.

pub mod airport;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};

use flightpath_lib::{load_network, resolve_data_dir, Network};

/// Locate and load the airport network.
pub(crate) fn load_dataset(data_dir: Option<&Path>) -> Result<Network> {
    let dir = resolve_data_dir(data_dir).context(
        "failed to locate the flight dataset (pass --data-dir or set FLIGHTPATH_DATA_DIR)",
    )?;
    load_network(&dir).with_context(|| format!("failed to load dataset from {}", dir.display()))
}
