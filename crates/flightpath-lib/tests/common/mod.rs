//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use flightpath_lib::{build_network_graph, load_network, Graph, Network, RoutingConfig};

#[allow(dead_code)]
/// Path to the OpenFlights fixture tables used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/openflights")
}

#[allow(dead_code)]
/// Load the fixture network.
pub fn fixture_network() -> Network {
    load_network(&fixtures_dir()).expect("fixture network loads")
}

/// Load the fixture network and build its graph with the given config.
#[allow(dead_code)]
pub fn fixture_graph(config: &RoutingConfig) -> (Network, Graph) {
    let network = fixture_network();
    let graph = build_network_graph(&network, &config.graph_options()).expect("graph builds");
    (network, graph)
}

/// Resolve a code that is known to exist in the fixture.
#[allow(dead_code)]
pub fn id(network: &Network, code: &str) -> flightpath_lib::LocationId {
    network
        .location_id_by_code(code)
        .unwrap_or_else(|| panic!("{code} present in fixture"))
}
