//! POI aggregation and assignment of POIs to their owning street nodes

use geo::{Distance, Haversine};
use hashbrown::HashSet;
use rayon::prelude::*;

use crate::PoiId;
use crate::model::{IntersectionPoi, Node, Poi, PoiFeature, Street};

/// Identity key of a street node: source id plus exact coordinate bits.
/// Streets hold their own copies of shared nodes; attaching by key keeps
/// every copy consistent.
type NodeKey = (i64, u64, u64);

fn node_key(node: &Node) -> NodeKey {
    (node.id, node.lat.to_bits(), node.lon.to_bits())
}

/// Attaches POI ids to street nodes: an intersection node owns its own
/// id, an amenity POI the node nearest to it by haversine distance.
/// Repeated assignments merge into one ordered, deduplicated id list.
pub fn assign_pois(streets: &mut [Street], amenities: &[Poi]) {
    for street in streets.iter_mut() {
        for node in street.nodes.iter_mut() {
            if node.intersection.is_some() {
                let own = node.id;
                node.attach_poi(own);
            }
        }
    }

    let clipped: &[Street] = streets;
    let owners: Vec<Option<NodeKey>> = amenities
        .par_iter()
        .map(|poi| nearest_node(clipped, poi))
        .collect();

    for (poi, owner) in amenities.iter().zip(owners) {
        let Some(key) = owner else { continue };
        attach_to_matching(streets, key, poi.id);
    }
}

/// Brute-force nearest-node search over every clipped street. At tens of
/// nodes and POIs the scan beats building an index; callers depend only
/// on the returned identity, so a spatial index can replace this without
/// interface changes.
fn nearest_node(streets: &[Street], poi: &Poi) -> Option<NodeKey> {
    let mut best: Option<(f64, NodeKey)> = None;
    for street in streets {
        for node in &street.nodes {
            let distance = Haversine.distance(poi.point(), node.point());
            if best.is_none_or(|(current, _)| distance < current) {
                best = Some((distance, node_key(node)));
            }
        }
    }
    best.map(|(_, key)| key)
}

fn attach_to_matching(streets: &mut [Street], key: NodeKey, poi: PoiId) {
    for street in streets.iter_mut() {
        for node in street.nodes.iter_mut() {
            if node_key(node) == key {
                node.attach_poi(poi);
            }
        }
    }
}

/// Unions intersection nodes and amenity POIs into the
/// `points_of_interest` list: intersection entries first, one per
/// physical node, then every amenity. An amenity sharing a location with
/// an intersection stays a distinct entry.
pub fn aggregate_pois(streets: &[Street], amenities: Vec<Poi>) -> Vec<PoiFeature> {
    let mut seen: HashSet<NodeKey> = HashSet::new();
    let mut features: Vec<PoiFeature> = Vec::new();
    for street in streets {
        for node in &street.nodes {
            if node.intersection.is_none() && node.cat.is_none() {
                continue;
            }
            if seen.insert(node_key(node)) {
                features.push(PoiFeature::Intersection(IntersectionPoi::from(node)));
            }
        }
    }
    features.extend(amenities.into_iter().map(PoiFeature::Amenity));
    features
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use super::*;

    fn node(id: i64, lat: f64, lon: f64) -> Node {
        Node::new(id, lat, lon, HashMap::new())
    }

    fn street(id: i64, nodes: Vec<Node>) -> Street {
        Street::from_way(id, HashMap::new(), nodes)
    }

    fn amenity(id: i64, lat: f64, lon: f64) -> Poi {
        Poi {
            id,
            lat,
            lon,
            name: None,
            cat: "cafe".to_string(),
            other_tags: HashMap::new(),
        }
    }

    #[test]
    fn amenity_attaches_to_the_nearest_node_only() {
        // Node 1 is ~5 m from the POI, node 2 ~50 m.
        let mut streets = vec![street(
            1,
            vec![node(1, 45.00104, -73.599), node(2, 45.00145, -73.599)],
        )];
        let pois = vec![amenity(100, 45.0010, -73.599)];

        assign_pois(&mut streets, &pois);

        assert_eq!(streets[0].nodes[0].poi_ids, vec![100]);
        assert!(streets[0].nodes[1].poi_ids.is_empty());
    }

    #[test]
    fn intersection_nodes_own_their_own_id() {
        let mut shared = node(7, 45.001, -73.599);
        shared.intersection = Some((1, 2));
        let mut streets = vec![street(1, vec![shared])];

        assign_pois(&mut streets, &[]);
        assert_eq!(streets[0].nodes[0].poi_ids, vec![7]);
    }

    #[test]
    fn assignments_merge_on_a_shared_owner() {
        let mut streets = vec![street(1, vec![node(1, 45.001, -73.599)])];
        let pois = vec![amenity(100, 45.00101, -73.599), amenity(101, 45.00099, -73.599)];

        assign_pois(&mut streets, &pois);
        assert_eq!(streets[0].nodes[0].poi_ids, vec![100, 101]);
    }

    #[test]
    fn shared_node_copies_stay_consistent() {
        // The same physical node appears in two streets; the amenity id
        // must land on both copies.
        let mut streets = vec![
            street(1, vec![node(7, 45.001, -73.599)]),
            street(2, vec![node(7, 45.001, -73.599), node(8, 45.002, -73.598)]),
        ];
        let pois = vec![amenity(100, 45.00101, -73.599)];

        assign_pois(&mut streets, &pois);
        assert_eq!(streets[0].nodes[0].poi_ids, vec![100]);
        assert_eq!(streets[1].nodes[0].poi_ids, vec![100]);
        assert!(streets[1].nodes[1].poi_ids.is_empty());
    }

    #[test]
    fn amenities_with_no_streets_stay_unassigned() {
        let mut streets: Vec<Street> = Vec::new();
        assign_pois(&mut streets, &[amenity(100, 45.001, -73.599)]);
    }

    #[test]
    fn aggregation_lists_each_intersection_once_then_amenities() {
        let mut shared = node(7, 45.001, -73.599);
        shared.intersection = Some((1, 2));
        shared.poi_ids = vec![7];
        let streets = vec![
            street(1, vec![shared.clone(), node(8, 45.0015, -73.5985)]),
            street(2, vec![shared]),
        ];

        let features = aggregate_pois(&streets, vec![amenity(100, 45.001, -73.599)]);

        assert_eq!(features.len(), 2);
        match &features[0] {
            PoiFeature::Intersection(poi) => assert_eq!(poi.id, 7),
            PoiFeature::Amenity(_) => panic!("expected the intersection first"),
        }
        match &features[1] {
            PoiFeature::Amenity(poi) => assert_eq!(poi.id, 100),
            PoiFeature::Intersection(_) => panic!("expected the amenity last"),
        }
    }
}
