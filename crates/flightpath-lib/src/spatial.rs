//! KD-tree proximity index over airport positions.
//!
//! Coordinates are projected onto a sphere of radius [`EARTH_RADIUS_KM`] in
//! three dimensions, so a straight-line radius query is equivalent to a
//! great-circle radius query once the radius is converted to a chord length.
//! The index only proposes candidates; callers confirm every pair with the
//! exact haversine distance.
//!
//! [`EARTH_RADIUS_KM`]: crate::geo::EARTH_RADIUS_KM

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::geo::{chord_length, Coordinate};
use crate::network::LocationId;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Relative slack added to chord radii so floating-point error never drops a
/// pair that sits right at the threshold.
const RADIUS_SLACK: f64 = 1e-6;

#[derive(Debug, Clone)]
struct IndexNode {
    id: LocationId,
    coordinate: Coordinate,
}

/// Proximity index used to enumerate ground-hop candidates.
pub struct ProximityIndex {
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    nodes: Vec<IndexNode>,
}

impl ProximityIndex {
    /// Build an index over the given locations.
    pub fn build<'a>(locations: impl IntoIterator<Item = (LocationId, &'a Coordinate)>) -> Self {
        let nodes: Vec<IndexNode> = locations
            .into_iter()
            .map(|(id, coordinate)| IndexNode {
                id,
                coordinate: *coordinate,
            })
            .collect();

        let mut tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        for (index, node) in nodes.iter().enumerate() {
            tree.add(&node.coordinate.to_cartesian(), index);
        }

        debug!(node_count = nodes.len(), "built proximity index");

        Self { tree, nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Locations strictly closer than `radius_km` along the surface, excluding
    /// the origin itself. Returns `(id, great-circle km)` sorted by distance.
    pub fn within_surface_radius(
        &self,
        origin: LocationId,
        coordinate: &Coordinate,
        radius_km: f64,
    ) -> Vec<(LocationId, f64)> {
        if radius_km <= 0.0 || self.nodes.is_empty() {
            return Vec::new();
        }

        let chord = chord_length(radius_km) * (1.0 + RADIUS_SLACK);
        let query = coordinate.to_cartesian();
        let mut neighbours: Vec<(LocationId, f64)> = self
            .tree
            .within::<SquaredEuclidean>(&query, chord * chord)
            .into_iter()
            .map(|neighbour| &self.nodes[neighbour.item])
            .filter(|node| node.id != origin)
            .map(|node| (node.id, coordinate.distance_km(&node.coordinate)))
            .filter(|(_, distance)| *distance < radius_km)
            .collect();

        neighbours.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        neighbours
    }

    /// All unordered pairs of distinct locations strictly closer than
    /// `radius_km`, each reported once with the lower id first.
    pub fn pairs_within(&self, radius_km: f64) -> Vec<(LocationId, LocationId, f64)> {
        let mut pairs = Vec::new();
        for node in &self.nodes {
            for (other, distance) in
                self.within_surface_radius(node.id, &node.coordinate, radius_km)
            {
                if node.id < other {
                    pairs.push((node.id, other, distance));
                }
            }
        }
        pairs.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        pairs
    }
}

impl std::fmt::Debug for ProximityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximityIndex")
            .field("node_count", &self.nodes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> Vec<(LocationId, Coordinate)> {
        vec![
            (13, Coordinate::new(51.4706, -0.461941)),
            (14, Coordinate::new(51.88499832, 0.234999999)),
            (15, Coordinate::new(51.14810181, -0.190277994)),
            (16, Coordinate::new(49.0127983, 2.54999995)),
        ]
    }

    fn index(points: &[(LocationId, Coordinate)]) -> ProximityIndex {
        ProximityIndex::build(points.iter().map(|(id, c)| (*id, c)))
    }

    #[test]
    fn empty_index_has_no_neighbours() {
        let index = index(&[]);
        assert!(index.is_empty());
        assert!(index.pairs_within(100.0).is_empty());
    }

    #[test]
    fn finds_neighbours_sorted_by_distance() {
        let points = london();
        let index = index(&points);
        let found = index.within_surface_radius(13, &points[0].1, 100.0);
        let ids: Vec<LocationId> = found.iter().map(|(id, _)| *id).collect();
        // Gatwick is closer to Heathrow than Stansted; Paris is out of range.
        assert_eq!(ids, vec![15, 14]);
    }

    #[test]
    fn pairs_match_brute_force() {
        let points = london();
        let index = index(&points);
        let expected: Vec<(LocationId, LocationId)> = points
            .iter()
            .flat_map(|(a, ca)| {
                points
                    .iter()
                    .filter(move |(b, cb)| a < b && ca.distance_km(cb) < 100.0)
                    .map(move |(b, _)| (*a, *b))
            })
            .collect();

        let found: Vec<(LocationId, LocationId)> = index
            .pairs_within(100.0)
            .into_iter()
            .map(|(a, b, _)| (a, b))
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn threshold_is_strict() {
        let points = london();
        let index = index(&points);
        let exact = points[0].1.distance_km(&points[2].1);
        assert!(index
            .within_surface_radius(13, &points[0].1, exact)
            .iter()
            .all(|(id, _)| *id != 15));
    }
}
