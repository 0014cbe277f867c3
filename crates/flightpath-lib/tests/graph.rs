mod common;

use common::{fixture_graph, id};
use flightpath_lib::{build_network_graph, EdgeKind, Error, GraphBuildOptions, RoutingConfig};

#[test]
fn fixture_graph_has_expected_edge_counts() {
    let (_, graph) = fixture_graph(&RoutingConfig::default());
    assert_eq!(graph.node_count(), 29);
    assert_eq!(graph.edge_count(EdgeKind::Flight), 98);
    // Six airport pairs sit closer than 100 km, each linked in both directions.
    assert_eq!(graph.edge_count(EdgeKind::Ground), 12);
}

#[test]
fn ground_edges_link_nearby_airports_only() {
    let (network, graph) = fixture_graph(&RoutingConfig::default());
    let pairs = [
        ("TLL", "EEHU"),
        ("SFO", "OAK"),
        ("JFK", "EWR"),
        ("LHR", "STN"),
        ("LHR", "LGW"),
        ("STN", "LGW"),
    ];
    for (a, b) in pairs {
        let (a, b) = (id(&network, a), id(&network, b));
        let forward = graph.edge(a, b, EdgeKind::Ground).expect("ground edge");
        let backward = graph.edge(b, a, EdgeKind::Ground).expect("ground edge");
        assert_eq!(forward.distance, backward.distance);
        assert!(forward.distance < 100.0);
    }

    // Helsinki is just over 100 km from Tallinn.
    let (tll, hel) = (id(&network, "TLL"), id(&network, "HEL"));
    assert!(graph.edge(tll, hel, EdgeKind::Ground).is_none());
    assert!(graph.edge(tll, hel, EdgeKind::Flight).is_some());
}

#[test]
fn flight_and_ground_edges_coexist() {
    let (network, graph) = fixture_graph(&RoutingConfig::default());
    let (jfk, ewr) = (id(&network, "JFK"), id(&network, "EWR"));
    let flight = graph.edge(jfk, ewr, EdgeKind::Flight);
    let ground = graph.edge(jfk, ewr, EdgeKind::Ground).expect("ground edge");
    if let Some(flight) = flight {
        assert_eq!(flight.distance, ground.distance);
    }
    assert_eq!(
        graph
            .neighbours(jfk)
            .iter()
            .filter(|edge| edge.target == ewr && edge.kind == EdgeKind::Ground)
            .count(),
        1
    );
}

#[test]
fn edge_weights_are_never_below_great_circle_distance() {
    let (_, graph) = fixture_graph(&RoutingConfig::default());
    for node in graph.nodes() {
        let from = graph.coordinate(node).unwrap();
        for edge in graph.neighbours(node) {
            let to = graph.coordinate(edge.target).unwrap();
            assert!(edge.distance + 1e-9 >= from.distance_km(&to));
        }
    }
}

#[test]
fn neighbours_are_sorted_by_distance() {
    let (_, graph) = fixture_graph(&RoutingConfig::default());
    for node in graph.nodes() {
        let distances: Vec<f64> = graph.neighbours(node).iter().map(|e| e.distance).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

#[test]
fn wider_threshold_adds_ground_edges() {
    let config = RoutingConfig::default().with_ground_hop_threshold_km(200.0);
    let (network, graph) = fixture_graph(&config);
    let (tll, hel) = (id(&network, "TLL"), id(&network, "HEL"));
    assert!(graph.edge(tll, hel, EdgeKind::Ground).is_some());
    assert!(graph.edge_count(EdgeKind::Ground) > 12);
    assert_eq!(graph.ground_hop_threshold_km(), 200.0);
}

#[test]
fn rejects_non_positive_threshold() {
    let (network, _) = fixture_graph(&RoutingConfig::default());
    let err = build_network_graph(
        &network,
        &GraphBuildOptions {
            ground_hop_threshold_km: 0.0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidGroundHopThreshold { .. }));
}
