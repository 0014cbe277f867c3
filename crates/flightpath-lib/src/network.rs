use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Numeric identifier for an airport.
pub type LocationId = i64;

/// Airport (or airfield) that routes can start, end or pass through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub city: String,
    pub country: String,
    /// Three-letter IATA code, when the airport has one.
    pub iata: Option<String>,
    /// Four-letter ICAO code, when the airport has one.
    pub icao: Option<String>,
    pub coordinate: Coordinate,
}

impl Location {
    /// Code shown to users: IATA, then ICAO, then the numeric id.
    pub fn display_code(&self) -> String {
        self.iata
            .as_deref()
            .or(self.icao.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Scheduled direct connection between two airports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    pub source: LocationId,
    pub destination: LocationId,
    /// Declared length of the flight in kilometres.
    pub distance: f64,
}

/// In-memory airport network with a code lookup table.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub locations: HashMap<LocationId, Location>,
    pub connections: Vec<Connection>,
    code_to_id: HashMap<String, LocationId>,
}

impl Network {
    /// Index a set of locations and connections.
    ///
    /// Fails on duplicate location ids; connection validation happens when the
    /// route graph is built.
    pub fn new(locations: Vec<Location>, connections: Vec<Connection>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(locations.len());
        let mut code_to_id = HashMap::new();

        for location in locations {
            for code in [location.iata.as_deref(), location.icao.as_deref()]
                .into_iter()
                .flatten()
            {
                code_to_id
                    .entry(code.to_lowercase())
                    .or_insert(location.id);
            }
            let id = location.id;
            if by_id.insert(id, location).is_some() {
                return Err(Error::DuplicateLocation { id });
            }
        }

        Ok(Self {
            locations: by_id,
            connections,
            code_to_id,
        })
    }

    /// Lookup an airport identifier by IATA or ICAO code, ignoring case.
    pub fn location_id_by_code(&self, code: &str) -> Option<LocationId> {
        self.code_to_id.get(&code.trim().to_lowercase()).copied()
    }

    /// Lookup an airport by IATA or ICAO code, ignoring case.
    pub fn location_by_code(&self, code: &str) -> Option<&Location> {
        self.location_id_by_code(code)
            .and_then(|id| self.locations.get(&id))
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Display code for an identifier, falling back to the numeric id.
    pub fn display_code(&self, id: LocationId) -> String {
        self.locations
            .get(&id)
            .map(Location::display_code)
            .unwrap_or_else(|| id.to_string())
    }

    /// Locations in ascending id order.
    pub fn sorted_locations(&self) -> Vec<Location> {
        let mut locations: Vec<Location> = self.locations.values().cloned().collect();
        locations.sort_by_key(|location| location.id);
        locations
    }

    /// Closest known codes to an unknown input, best match first.
    pub fn fuzzy_code_matches(&self, code: &str, limit: usize) -> Vec<String> {
        const MIN_SIMILARITY: f64 = 0.7;

        let needle = code.trim().to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .code_to_id
            .keys()
            .map(|candidate| (strsim::jaro_winkler(&needle, candidate), candidate.as_str()))
            .filter(|(score, _)| *score >= MIN_SIMILARITY)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_uppercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: LocationId, iata: Option<&str>, icao: Option<&str>) -> Location {
        Location {
            id,
            name: format!("Airport {id}"),
            city: "City".to_string(),
            country: "Country".to_string(),
            iata: iata.map(str::to_string),
            icao: icao.map(str::to_string),
            coordinate: Coordinate::new(0.0, 0.0),
        }
    }

    #[test]
    fn lookup_is_case_insensitive_for_both_codes() {
        let network = Network::new(
            vec![location(1, Some("TLL"), Some("EETN"))],
            Vec::new(),
        )
        .unwrap();

        assert_eq!(network.location_id_by_code("tll"), Some(1));
        assert_eq!(network.location_id_by_code("EeTn"), Some(1));
        assert_eq!(network.location_id_by_code("XXX"), None);
    }

    #[test]
    fn display_code_prefers_iata_then_icao() {
        assert_eq!(location(1, Some("TLL"), Some("EETN")).display_code(), "TLL");
        assert_eq!(location(2, None, Some("EEHU")).display_code(), "EEHU");
        assert_eq!(location(3, None, None).display_code(), "3");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Network::new(
            vec![location(1, Some("AAA"), None), location(1, Some("BBB"), None)],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateLocation { id: 1 }));
    }

    #[test]
    fn fuzzy_matches_rank_closest_codes_first() {
        let network = Network::new(
            vec![
                location(1, Some("LHR"), Some("EGLL")),
                location(2, Some("LGW"), Some("EGKK")),
                location(3, Some("SFO"), Some("KSFO")),
            ],
            Vec::new(),
        )
        .unwrap();

        let matches = network.fuzzy_code_matches("LHX", 3);
        assert_eq!(matches.first().map(String::as_str), Some("LHR"));
        assert!(!matches.contains(&"KSFO".to_string()));
    }
}
