mod common;

use common::{fixture_network, fixtures_dir};
use flightpath_lib::dataset::{
    load_connections_from_reader, AIRPORTS_FILENAME, ROUTES_FILENAME,
};
use flightpath_lib::{load_network, resolve_data_dir, Error};
use std::collections::HashMap;
use std::fs;

#[test]
fn loads_fixture_tables() {
    let network = fixture_network();
    assert_eq!(network.locations.len(), 29);
    // 98 directed rows plus one repeated airline row; two rows are unresolvable.
    assert_eq!(network.connections.len(), 99);
}

#[test]
fn skips_unresolvable_route_rows() {
    let network = fixture_network();
    let coordinates: HashMap<_, _> = network
        .locations
        .values()
        .map(|location| (location.id, location.coordinate))
        .collect();
    let routes = fs::File::open(fixtures_dir().join(ROUTES_FILENAME)).unwrap();
    let load = load_connections_from_reader(routes, &coordinates).unwrap();
    assert_eq!(load.skipped, 2);
    assert_eq!(load.connections.len(), 99);
}

#[test]
fn codes_resolve_case_insensitively() {
    let network = fixture_network();
    assert_eq!(network.location_id_by_code("TLL"), Some(1));
    assert_eq!(network.location_id_by_code("tll"), Some(1));
    assert_eq!(network.location_id_by_code("EETN"), Some(1));
    assert_eq!(network.location_id_by_code("XXX"), None);
}

#[test]
fn airport_without_iata_uses_icao_code() {
    let network = fixture_network();
    let haapsalu = network.location_by_code("eehu").expect("EEHU present");
    assert_eq!(haapsalu.id, 29);
    assert_eq!(haapsalu.iata, None);
    assert_eq!(haapsalu.display_code(), "EEHU");
    assert_eq!(network.display_code(29), "EEHU");
}

#[test]
fn fuzzy_matches_suggest_close_codes() {
    let network = fixture_network();
    let suggestions = network.fuzzy_code_matches("TLX", 3);
    assert!(suggestions.contains(&"TLL".to_string()));
    assert!(suggestions.len() <= 3);
}

#[test]
fn resolve_data_dir_accepts_fixture_directory() {
    let dir = resolve_data_dir(Some(&fixtures_dir())).unwrap();
    assert!(dir.join(AIRPORTS_FILENAME).is_file());
}

#[test]
fn missing_route_table_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    fs::copy(
        fixtures_dir().join(AIRPORTS_FILENAME),
        temp.path().join(AIRPORTS_FILENAME),
    )
    .unwrap();

    let err = load_network(temp.path()).unwrap_err();
    match err {
        Error::DatasetNotFound { path } => assert!(path.ends_with(ROUTES_FILENAME)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_airport_row_reports_file_and_line() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join(AIRPORTS_FILENAME),
        "1,\"A\",\"B\",\"C\",\"AAA\",\"AAAA\",1.0,2.0\n2,\"D\",\"E\",\"F\",\"BBB\",\"BBBB\",abc,2.0\n",
    )
    .unwrap();
    fs::write(temp.path().join(ROUTES_FILENAME), "").unwrap();

    let err = load_network(temp.path()).unwrap_err();
    assert_eq!(err.to_string(), "airports.dat:2: invalid latitude \"abc\"");
}
