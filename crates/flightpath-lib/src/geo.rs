//! Great-circle geometry on a spherical Earth.
//!
//! Every distance in the crate is expressed in kilometres and computed with the
//! haversine formula over a sphere of radius [`EARTH_RADIUS_KM`]. The same
//! function weights ground hops and drives the A* heuristic, which keeps the
//! heuristic admissible for synthetic edges by construction.

use serde::Serialize;

/// Mean Earth radius used for all surface distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and within the geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to another coordinate in kilometres.
    pub fn distance_km(&self, other: &Self) -> f64 {
        great_circle_distance(*self, *other)
    }

    /// Cartesian position on a sphere of radius [`EARTH_RADIUS_KM`].
    ///
    /// Straight-line (chord) distance between two of these points is monotonic
    /// in the great-circle distance, which is what the proximity index relies on.
    pub fn to_cartesian(&self) -> [f64; 3] {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        [
            EARTH_RADIUS_KM * lat.cos() * lon.cos(),
            EARTH_RADIUS_KM * lat.cos() * lon.sin(),
            EARTH_RADIUS_KM * lat.sin(),
        ]
    }
}

/// Haversine distance between two coordinates in kilometres.
pub fn great_circle_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` marginally above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Chord length subtending a surface arc of `surface_km`.
pub(crate) fn chord_length(surface_km: f64) -> f64 {
    let angle = (surface_km / EARTH_RADIUS_KM).min(std::f64::consts::PI);
    2.0 * EARTH_RADIUS_KM * (angle / 2.0).sin()
}
