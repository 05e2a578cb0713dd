//! Street ranking by physical length
//!
//! Longer streets first, so consumers that render only the N most
//! prominent streets get a stable layering for free.

use geo::{Distance, Haversine};
use itertools::Itertools;

use crate::model::Street;

/// Computes each street's clipped length and orders the list longest
/// first
pub fn rank_streets(streets: &mut [Street]) {
    for street in streets.iter_mut() {
        street.length_m = street_length(street);
    }
    streets.sort_by(|a, b| b.length_m.total_cmp(&a.length_m));
}

/// Haversine sum over consecutive node pairs; a street with fewer than
/// two nodes has zero length
fn street_length(street: &Street) -> f64 {
    street
        .nodes
        .iter()
        .tuple_windows()
        .map(|(a, b)| Haversine.distance(a.point(), b.point()))
        .sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use hashbrown::HashMap;

    use super::*;
    use crate::model::Node;

    fn street_with(id: i64, coords: &[(f64, f64)]) -> Street {
        let nodes = coords
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon))| Node::new(i as i64, lat, lon, HashMap::new()))
            .collect();
        Street::from_way(id, HashMap::new(), nodes)
    }

    #[test]
    fn two_node_length_matches_the_haversine_distance() {
        let mut streets = vec![street_with(1, &[(0.0, 0.0), (0.0, 0.001)])];
        rank_streets(&mut streets);

        let expected = Haversine.distance(
            geo::Point::new(0.0, 0.0),
            geo::Point::new(0.001, 0.0),
        );
        assert!(streets[0].length_m >= 0.0);
        assert_relative_eq!(streets[0].length_m, expected, epsilon = 1e-9);
    }

    #[test]
    fn streets_sort_longest_first() {
        let mut streets = vec![
            street_with(1, &[(0.0, 0.0), (0.0, 0.001)]),
            street_with(2, &[(0.0, 0.0), (0.0, 0.005)]),
            street_with(3, &[(0.0, 0.0), (0.0, 0.003)]),
        ];
        rank_streets(&mut streets);

        let ids: Vec<i64> = streets.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(
            streets
                .windows(2)
                .all(|pair| pair[0].length_m >= pair[1].length_m)
        );
    }

    #[test]
    fn single_node_street_has_zero_length() {
        let mut streets = vec![street_with(1, &[(0.0, 0.0)])];
        rank_streets(&mut streets);
        assert_eq!(streets[0].length_m, 0.0);
    }
}
