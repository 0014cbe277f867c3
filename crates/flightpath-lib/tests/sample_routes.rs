mod common;

use common::fixture_graph;
use flightpath_lib::{
    plan_route, EdgeKind, Error, RouteAlgorithm, RoutePlan, RouteRequest, RoutingConfig,
};

fn route(from: &str, to: &str, max_layovers: u32) -> Result<(Vec<String>, RoutePlan), Error> {
    let config = RoutingConfig::default();
    let (network, graph) = fixture_graph(&config);
    let request = RouteRequest::new(from, to).with_max_layovers(max_layovers);
    let plan = plan_route(&network, &graph, &config, &request)?;
    Ok((plan.step_codes(&network), plan))
}

#[test]
fn tallinn_to_san_francisco_finishes_with_ground_hop() {
    let (codes, plan) = route("TLL", "SFO", 4).expect("route exists");
    assert_eq!(codes, ["TLL", "ARN", "OAK", "SFO"]);
    assert_eq!(plan.distance, 8995);
    assert_eq!(plan.flights(), 2);
    assert_eq!(plan.ground_hops(), 1);
    assert_eq!(plan.legs.last().map(|leg| leg.kind), Some(EdgeKind::Ground));
}

#[test]
fn tallinn_to_san_francisco_with_two_flights_changes_airport_in_london() {
    let (codes, plan) = route("TLL", "SFO", 2).expect("route exists");
    assert_eq!(codes, ["TLL", "STN", "LHR", "SFO"]);
    assert_eq!(plan.flights(), 2);
    assert!(plan.distance > 8995);
}

#[test]
fn tallinn_to_san_francisco_needs_more_than_one_flight() {
    let err = route("TLL", "SFO", 1).unwrap_err();
    assert!(matches!(err, Error::RouteNotFound { .. }));
}

#[test]
fn havana_to_tartu_uses_four_flights() {
    let (codes, plan) = route("HAV", "TAY", 4).expect("route exists");
    assert_eq!(codes, ["HAV", "NAS", "JFK", "HEL", "TAY"]);
    assert_eq!(plan.distance, 9171);
    assert_eq!(plan.flights(), 4);
    assert_eq!(plan.ground_hops(), 0);

    for max_layovers in 1..=3 {
        let err = route("HAV", "TAY", max_layovers).unwrap_err();
        assert!(matches!(err, Error::RouteNotFound { .. }));
    }
}

#[test]
fn tallinn_to_heathrow_via_stansted() {
    let (codes, plan) = route("TLL", "LHR", 4).expect("route exists");
    assert_eq!(codes, ["TLL", "STN", "LHR"]);
    assert_eq!(plan.distance, 1808);
    assert_eq!(plan.legs[0].kind, EdgeKind::Flight);
    assert_eq!(plan.legs[1].kind, EdgeKind::Ground);
}

#[test]
fn svalbard_is_unreachable() {
    for max_layovers in 1..=6 {
        let err = route("TLL", "LYR", max_layovers).unwrap_err();
        assert_eq!(err.to_string(), "no route found between TLL and LYR");
    }
}

#[test]
fn reverse_routes_mirror_forward_routes() {
    let (codes, plan) = route("SFO", "TLL", 4).expect("route exists");
    assert_eq!(codes, ["SFO", "OAK", "ARN", "TLL"]);
    assert_eq!(plan.distance, 8995);

    let (codes, plan) = route("TAY", "HAV", 4).expect("route exists");
    assert_eq!(codes, ["TAY", "HEL", "JFK", "NAS", "HAV"]);
    assert_eq!(plan.distance, 9171);
}

#[test]
fn ground_only_route_to_airport_without_iata_code() {
    let (codes, plan) = route("TLL", "EEHU", 4).expect("route exists");
    assert_eq!(codes, ["TLL", "EEHU"]);
    assert_eq!(plan.flights(), 0);
    assert_eq!(plan.distance, 95);
}

#[test]
fn dijkstra_agrees_with_a_star_on_samples() {
    let config = RoutingConfig::default();
    let (network, graph) = fixture_graph(&config);
    for (from, to) in [("TLL", "SFO"), ("HAV", "TAY"), ("TLL", "LHR")] {
        let a_star = plan_route(&network, &graph, &config, &RouteRequest::new(from, to)).unwrap();
        let dijkstra = plan_route(
            &network,
            &graph,
            &config,
            &RouteRequest::new(from, to).with_algorithm(RouteAlgorithm::Dijkstra),
        )
        .unwrap();
        assert_eq!(a_star.steps, dijkstra.steps);
        assert!((a_star.exact_distance - dijkstra.exact_distance).abs() < 1e-6);
        assert_eq!(dijkstra.algorithm, RouteAlgorithm::Dijkstra);
    }
}
