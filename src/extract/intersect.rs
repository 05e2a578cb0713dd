//! Street-to-street intersection detection and annotation
//!
//! Only nodes that are identical across id and exact coordinates count
//! as shared; coincidental proximity without a common node is not an
//! intersection.

use hashbrown::HashMap;

use crate::WayId;
use crate::model::{IntersectionRecord, Node, Street};

/// Finds nodes shared between pairs of streets and merges the per-pair
/// records into one deduplicated record per street.
///
/// The pairwise scan is quadratic in the street count; a single
/// bounding-box query keeps that in the tens to low hundreds of streets.
pub fn find_intersections(streets: &[Street]) -> Vec<IntersectionRecord> {
    let mut merged: Vec<IntersectionRecord> = Vec::new();
    let mut slots: HashMap<WayId, usize> = HashMap::new();

    for (i, a) in streets.iter().enumerate() {
        for b in streets.iter().skip(i + 1) {
            let shared: Vec<Node> = a
                .nodes
                .iter()
                .filter(|n| b.nodes.iter().any(|m| m.same_identity(n)))
                .cloned()
                .collect();
            if shared.is_empty() {
                continue;
            }
            merge_record(&mut merged, &mut slots, a, &shared);
            merge_record(&mut merged, &mut slots, b, &shared);
        }
    }
    merged
}

fn merge_record(
    merged: &mut Vec<IntersectionRecord>,
    slots: &mut HashMap<WayId, usize>,
    street: &Street,
    shared: &[Node],
) {
    let slot = *slots.entry(street.id).or_insert_with(|| {
        merged.push(IntersectionRecord {
            street_id: street.id,
            label: street.name.clone().or_else(|| street.kind.clone()),
            nodes: Vec::new(),
        });
        merged.len() - 1
    });
    for node in shared {
        if !merged[slot].nodes.iter().any(|m| m.same_identity(node)) {
            merged[slot].nodes.push(node.clone());
        }
    }
}

/// Writes intersection metadata onto every street node that appears in
/// another street's merged record: the node's own road classification as
/// `cat`, the participating street pair, and a readable name composed
/// per side as name, else type, else id.
pub fn annotate_intersections(streets: &mut [Street], records: &[IntersectionRecord]) {
    for street in streets.iter_mut() {
        let own_id = street.id;
        let own_label = street.label();
        for record in records.iter().filter(|r| r.street_id != own_id) {
            let other_label = record
                .label
                .clone()
                .unwrap_or_else(|| record.street_id.to_string());
            for node in street.nodes.iter_mut() {
                if !record.nodes.iter().any(|m| m.same_identity(node)) {
                    continue;
                }
                if let Some(classification) = node.tags.get("highway") {
                    node.cat = Some(classification.clone());
                }
                node.intersection = Some((own_id, record.street_id));
                node.name = Some(format!("{own_label} intersecting {other_label}"));
            }
        }
    }
}
