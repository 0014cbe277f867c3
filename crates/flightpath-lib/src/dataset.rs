//! Loading of OpenFlights-style airport and route tables.
//!
//! The dataset directory is expected to contain `airports.dat` and
//! `routes.dat`. Both are header-less CSV files that use `\N` for null values.
//! Only the columns needed for routing are read:
//!
//! ```text
//! airports.dat: id, name, city, country, iata, icao, latitude, longitude, ...
//! routes.dat:   airline, airline_id, source, source_id, destination, destination_id, ...
//! ```
//!
//! Route rows whose airport ids are null or unknown are skipped with a warning,
//! since the public route table references airports that are missing from the
//! airport table. Flight distance is derived from the endpoint coordinates.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::network::{Connection, Location, LocationId, Network};

/// File name of the airport table inside a dataset directory.
pub const AIRPORTS_FILENAME: &str = "airports.dat";

/// File name of the route table inside a dataset directory.
pub const ROUTES_FILENAME: &str = "routes.dat";

/// Environment variable overriding the dataset directory.
pub const DATA_DIR_ENV: &str = "FLIGHTPATH_DATA_DIR";

const NULL_FIELD: &str = "\\N";

/// Connections parsed from a route table plus the number of rows skipped.
#[derive(Debug, Clone, Default)]
pub struct ConnectionLoad {
    pub connections: Vec<Connection>,
    pub skipped: usize,
}

/// Resolve the dataset directory.
///
/// Order of precedence: explicit override, `FLIGHTPATH_DATA_DIR`, then the
/// platform data directory for the application.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(DATA_DIR_ENV) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => default_data_dir()?,
        },
    };

    if !dir.join(AIRPORTS_FILENAME).is_file() {
        return Err(Error::DatasetNotFound { path: dir });
    }
    Ok(dir)
}

/// Platform-specific data directory, e.g. `~/.local/share/flightpath`.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "flightpath", "flightpath").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Load the airport network from a dataset directory.
pub fn load_network(dir: &Path) -> Result<Network> {
    let airports_path = dir.join(AIRPORTS_FILENAME);
    let routes_path = dir.join(ROUTES_FILENAME);

    if !airports_path.is_file() {
        return Err(Error::DatasetNotFound {
            path: airports_path,
        });
    }
    if !routes_path.is_file() {
        return Err(Error::DatasetNotFound { path: routes_path });
    }

    debug!(path = %airports_path.display(), "loading airports");
    let locations = load_locations_from_reader(File::open(&airports_path)?)?;

    let coordinates: HashMap<LocationId, Coordinate> = locations
        .iter()
        .map(|location| (location.id, location.coordinate))
        .collect();

    debug!(path = %routes_path.display(), "loading routes");
    let load = load_connections_from_reader(File::open(&routes_path)?, &coordinates)?;
    if load.skipped > 0 {
        warn!(
            skipped = load.skipped,
            "skipped routes referencing unknown airports"
        );
    }

    info!(
        airports = locations.len(),
        routes = load.connections.len(),
        "loaded airport network"
    );

    Network::new(locations, load.connections)
}

/// Parse an airport table.
pub fn load_locations_from_reader<R: Read>(reader: R) -> Result<Vec<Location>> {
    let mut csv_reader = table_reader(reader);
    let mut locations = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = line_of(&record);

        let id = airport_number::<LocationId>(&record, 0, "id", line)?;
        let latitude = airport_number::<f64>(&record, 6, "latitude", line)?;
        let longitude = airport_number::<f64>(&record, 7, "longitude", line)?;

        locations.push(Location {
            id,
            name: optional_field(&record, 1).unwrap_or_default(),
            city: optional_field(&record, 2).unwrap_or_default(),
            country: optional_field(&record, 3).unwrap_or_default(),
            iata: optional_field(&record, 4),
            icao: optional_field(&record, 5),
            coordinate: Coordinate::new(latitude, longitude),
        });
    }

    Ok(locations)
}

/// Parse a route table, resolving endpoints against known airport coordinates.
pub fn load_connections_from_reader<R: Read>(
    reader: R,
    coordinates: &HashMap<LocationId, Coordinate>,
) -> Result<ConnectionLoad> {
    let mut csv_reader = table_reader(reader);
    let mut load = ConnectionLoad::default();

    for result in csv_reader.records() {
        let record = result?;
        let line = line_of(&record);

        let endpoints = (optional_field(&record, 3), optional_field(&record, 5));
        let (Some(source), Some(destination)) = endpoints else {
            debug!(line, "route without airport ids");
            load.skipped += 1;
            continue;
        };

        let source = parse_number::<LocationId>(&source, "source_id", ROUTES_FILENAME, line)?;
        let destination =
            parse_number::<LocationId>(&destination, "destination_id", ROUTES_FILENAME, line)?;

        let (Some(from), Some(to)) = (coordinates.get(&source), coordinates.get(&destination))
        else {
            debug!(line, source, destination, "route references unknown airport");
            load.skipped += 1;
            continue;
        };

        load.connections.push(Connection {
            source,
            destination,
            distance: from.distance_km(to),
        });
    }

    Ok(load)
}

fn table_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(reader)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or_default()
}

fn optional_field(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .filter(|value| !value.is_empty() && *value != NULL_FIELD)
        .map(str::to_string)
}

fn airport_number<T: std::str::FromStr>(
    record: &StringRecord,
    index: usize,
    column: &str,
    line: u64,
) -> Result<T> {
    let value = record
        .get(index)
        .filter(|value| !value.is_empty() && *value != NULL_FIELD)
        .ok_or_else(|| Error::DatasetParse {
            file: AIRPORTS_FILENAME.to_string(),
            line,
            message: format!("missing {column}"),
        })?;
    parse_number(value, column, AIRPORTS_FILENAME, line)
}

fn parse_number<T: std::str::FromStr>(value: &str, column: &str, file: &str, line: u64) -> Result<T> {
    value.parse::<T>().map_err(|_| Error::DatasetParse {
        file: file.to_string(),
        line,
        message: format!("invalid {column} {value:?}"),
    })
}
