//! Test utilities for handler testing with the fixture dataset.

use std::path::PathBuf;
use std::sync::OnceLock;

use flightpath_lib::RoutingConfig;

use crate::state::AppState;

/// Path to the OpenFlights-format fixture directory.
pub const TEST_FIXTURE_DIR: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures/openflights");

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared state loaded from the fixture dataset with default routing
/// settings. Loaded once per test binary.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| state_with_config(RoutingConfig::default()))
        .clone()
}

/// Fresh state loaded from the fixture dataset with custom settings.
pub fn state_with_config(config: RoutingConfig) -> AppState {
    let path = fixture_dir();
    AppState::load(Some(&path), config)
        .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
}

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_DIR)
}

/// Airport codes present in the fixture.
pub mod fixture_airports {
    /// Tallinn; has a ground hop to Haapsalu (EEHU).
    pub const TLL: &str = "TLL";
    pub const SFO: &str = "SFO";
    /// Oakland; ground hop from SFO.
    pub const OAK: &str = "OAK";
    pub const HAV: &str = "HAV";
    /// Tartu; only reachable from Havana with four flights.
    pub const TAY: &str = "TAY";
    pub const LHR: &str = "LHR";
    /// Svalbard; no connections to the rest of the network.
    pub const LYR: &str = "LYR";
    /// Haapsalu airfield, ICAO code only.
    pub const EEHU: &str = "EEHU";
}
