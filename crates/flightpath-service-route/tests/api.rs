use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use flightpath_lib::RoutingConfig;
use flightpath_service_route::{app, RouteResponse};
use flightpath_service_shared::test_utils::{fixture_airports, state_with_config, test_state};

fn server() -> TestServer {
    TestServer::new(app(test_state(), "/metrics")).expect("test server starts")
}

#[tokio::test]
async fn health_returns_ok_text() {
    let response = server().get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn readiness_reports_loaded_airports() {
    let response = server().get("/health/ready").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["airports_loaded"], 29);
    assert_eq!(body["ground_edges"], 12);
}

#[tokio::test]
async fn route_between_fixture_airports() {
    let response = server().get("/routes/TLL/SFO").await;
    response.assert_status_ok();

    let body: RouteResponse = response.json();
    assert_eq!(body.source, "TLL");
    assert_eq!(body.destination, "SFO");
    assert_eq!(body.distance, 8995);
    assert_eq!(body.hops, vec!["TLL", "ARN", "OAK", "SFO"]);
    assert_eq!(body.flights, 2);
    assert_eq!(body.ground_hops, 1);
}

#[tokio::test]
async fn route_json_has_only_summary_fields() {
    let response = server().get("/routes/HAV/TAY").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let mut keys: Vec<&str> = body
        .as_object()
        .expect("object body")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["destination", "distance", "flights", "ground_hops", "hops", "source"]
    );
    assert_eq!(body["hops"], serde_json::json!(["HAV", "NAS", "JFK", "HEL", "TAY"]));
}

#[tokio::test]
async fn codes_are_case_insensitive() {
    let response = server().get("/routes/tll/lhr").await;
    response.assert_status_ok();

    let body: RouteResponse = response.json();
    assert_eq!(body.source, "tll");
    assert_eq!(body.destination, "lhr");
    assert_eq!(body.hops, vec!["TLL", "STN", "LHR"]);
    assert_eq!(body.ground_hops, 1);
}

#[tokio::test]
async fn response_echoes_requested_codes() {
    let response = server().get("/routes/EETN/EGSS").await;
    response.assert_status_ok();

    let body: RouteResponse = response.json();
    assert_eq!(body.source, "EETN");
    assert_eq!(body.destination, "EGSS");
    assert_eq!(body.hops.first().map(String::as_str), Some("TLL"));
    assert_eq!(body.hops.last().map(String::as_str), Some("STN"));
}

#[tokio::test]
async fn dijkstra_matches_a_star_distance() {
    let response = server()
        .get("/routes/SFO/TLL")
        .add_query_param("algorithm", "dijkstra")
        .await;
    response.assert_status_ok();

    let body: RouteResponse = response.json();
    assert_eq!(body.distance, 8995);
}

#[tokio::test]
async fn layover_cap_can_make_route_unreachable() {
    let response = server()
        .get("/routes/TLL/SFO")
        .add_query_param("max_layovers", 1)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Route Not Found");
}

#[tokio::test]
async fn tighter_cap_changes_route() {
    let response = server()
        .get("/routes/TLL/SFO")
        .add_query_param("max_layovers", 2)
        .await;
    response.assert_status_ok();

    let body: RouteResponse = response.json();
    assert_eq!(body.hops, vec!["TLL", "STN", "LHR", "SFO"]);
}

#[tokio::test]
async fn isolated_airport_has_no_route() {
    let response = server()
        .get(&format!("/routes/{}/{}", fixture_airports::TLL, fixture_airports::LYR))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn identical_airports_are_rejected() {
    let response = server().get("/routes/TLL/tll").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["detail"], "start and goal must be different locations");
}

#[tokio::test]
async fn unknown_code_suggests_alternatives() {
    let response = server().get("/routes/TLX/SFO").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/problem+json");

    let body: Value = response.json();
    assert_eq!(body["title"], "Unknown Airport");
    assert!(body["detail"].as_str().unwrap().contains("TLL"));
}

#[tokio::test]
async fn zero_layovers_is_a_bad_request() {
    let response = server()
        .get("/routes/TLL/SFO")
        .add_query_param("max_layovers", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_query_is_a_bad_request() {
    let response = server()
        .get("/routes/TLL/SFO")
        .add_query_param("max_layovers", "abc")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server()
        .get("/routes/TLL/SFO")
        .add_query_param("algorithm", "bfs")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_code_is_a_bad_request() {
    let response = server().get("/routes/T-L/SFO").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exhausted_budget_is_service_unavailable() {
    let config = RoutingConfig {
        max_expansions: Some(1),
        ..RoutingConfig::default()
    };
    let server = TestServer::new(app(state_with_config(config), "/metrics")).unwrap();

    let response = server.get("/routes/HAV/TAY").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn airport_lookup_by_icao_code() {
    let response = server()
        .get(&format!("/airports/{}", fixture_airports::EEHU.to_lowercase()))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["icao"], "EEHU");
    assert_eq!(body["iata"], Value::Null);
}

#[tokio::test]
async fn unknown_airport_lookup_is_not_found() {
    let response = server().get("/airports/ZZZZ").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = server()
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("test-123"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        &HeaderValue::from_static("test-123")
    );
}

#[tokio::test]
async fn problem_instance_carries_request_id() {
    let response = server()
        .get("/routes/TLL/LYR")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-lyr"),
        )
        .await;
    let body: Value = response.json();
    assert_eq!(body["instance"], "req-lyr");
}

#[tokio::test]
async fn metrics_endpoint_responds() {
    let response = server().get("/metrics").await;
    response.assert_status_ok();
}
