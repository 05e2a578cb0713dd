//! Street normalization: clipping way nodes to the bounding box and
//! synthesizing boundary nodes where a way only partially enters it
//!
//! A way that merely clips the corner of the box would otherwise be
//! reduced to an isolated point; displacing its nearest outside
//! neighbours onto the box perimeter keeps at least one real path
//! segment inside the box.

use geo::{Bearing, Geodesic, Point};
use hashbrown::HashSet;
use log::debug;

use crate::NodeId;
use crate::fetch::{RawNode, RawWay};
use crate::model::{BoundingBox, Node, Street};

/// Clips every way to the box and drops streets left with no nodes
pub fn normalize_streets(bbox: &BoundingBox, ways: Vec<RawWay>) -> Vec<Street> {
    ways.into_iter()
        .filter_map(|way| clip_way(bbox, way))
        .collect()
}

fn clip_way(bbox: &BoundingBox, way: RawWay) -> Option<Street> {
    let unbounded = dedup_nodes(&way.nodes);
    let bounded: Vec<&RawNode> = unbounded
        .iter()
        .copied()
        .filter(|n| bbox.contains(n.lat, n.lon))
        .collect();

    let mut nodes: Vec<Node> = bounded
        .iter()
        .map(|n| Node::new(n.id, n.lat, n.lon, n.tags.clone()))
        .collect();

    if !bounded.is_empty() && unbounded.len() > bounded.len() {
        interpolate_boundary(bbox, &bounded, &unbounded, &mut nodes);
    }

    if nodes.is_empty() {
        return None;
    }
    Some(Street::from_way(way.id, way.tags, nodes))
}

/// Removes repeated node ids, keeping the first occurrence in path order
fn dedup_nodes(nodes: &[RawNode]) -> Vec<&RawNode> {
    let mut seen = HashSet::new();
    nodes.iter().filter(|n| seen.insert(n.id)).collect()
}

/// Synthesizes up to two displaced nodes: one toward the neighbour just
/// past the last bounded node (appended) and one toward the neighbour
/// just before the first bounded node (prepended). With a single bounded
/// node both directions start from it.
fn interpolate_boundary(
    bbox: &BoundingBox,
    bounded: &[&RawNode],
    unbounded: &[&RawNode],
    nodes: &mut Vec<Node>,
) {
    let (Some(first), Some(last)) = (bounded.first(), bounded.last()) else {
        return;
    };

    if let Some(outside) = neighbour_of(unbounded, last.id, 1)
        && let Some(node) = displace_toward(bbox, last, outside)
    {
        nodes.push(node);
    }
    if let Some(outside) = neighbour_of(unbounded, first.id, -1)
        && let Some(node) = displace_toward(bbox, first, outside)
    {
        nodes.insert(0, node);
    }
}

fn neighbour_of<'a>(unbounded: &[&'a RawNode], id: NodeId, offset: isize) -> Option<&'a RawNode> {
    let position = unbounded.iter().position(|n| n.id == id)?;
    let index = position.checked_add_signed(offset)?;
    unbounded.get(index).copied()
}

/// Synthesizes a node on the box side the segment toward `outside` most
/// likely crosses. The azimuth quadrant yields two candidate sides; the
/// second is tried when the first solution falls outside the box, and
/// the node is skipped when both fail.
fn displace_toward(bbox: &BoundingBox, origin: &RawNode, outside: &RawNode) -> Option<Node> {
    let azimuth = Geodesic
        .bearing(point(origin), point(outside))
        .rem_euclid(360.0);
    let (primary, secondary) = candidate_sides(azimuth);

    let solved = solve_on_side(bbox, origin, azimuth, primary)
        .or_else(|| solve_on_side(bbox, origin, azimuth, secondary));
    match solved {
        Some((lat, lon)) => Some(Node::displaced(outside.id, lat, lon)),
        None => {
            debug!(
                "No valid boundary point from node {} toward node {} (azimuth {azimuth:.1})",
                origin.id, outside.id
            );
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Candidate box sides for an azimuth in degrees clockwise from north.
/// Each quadrant maps to two adjacent sides; the side nearer the azimuth
/// is tried first.
fn candidate_sides(azimuth: f64) -> (Side, Side) {
    match azimuth {
        a if a < 45.0 => (Side::Top, Side::Right),
        a if a < 90.0 => (Side::Right, Side::Top),
        a if a < 135.0 => (Side::Right, Side::Bottom),
        a if a < 180.0 => (Side::Bottom, Side::Right),
        a if a < 225.0 => (Side::Bottom, Side::Left),
        a if a < 270.0 => (Side::Left, Side::Bottom),
        a if a < 315.0 => (Side::Left, Side::Top),
        _ => (Side::Top, Side::Left),
    }
}

/// Solves for the crossing point on one box side using the tangent
/// relationship between northward and eastward displacement along the
/// azimuth
fn solve_on_side(
    bbox: &BoundingBox,
    origin: &RawNode,
    azimuth: f64,
    side: Side,
) -> Option<(f64, f64)> {
    let tangent = azimuth.to_radians().tan();
    let (lat, lon) = match side {
        Side::Top => (
            bbox.lat_max,
            origin.lon + (bbox.lat_max - origin.lat) * tangent,
        ),
        Side::Bottom => (
            bbox.lat_min,
            origin.lon + (bbox.lat_min - origin.lat) * tangent,
        ),
        Side::Right => (
            origin.lat + (bbox.lon_max - origin.lon) / tangent,
            bbox.lon_max,
        ),
        Side::Left => (
            origin.lat + (bbox.lon_min - origin.lon) / tangent,
            bbox.lon_min,
        ),
    };
    (lat.is_finite() && lon.is_finite() && bbox.contains(lat, lon)).then_some((lat, lon))
}

fn point(node: &RawNode) -> Point<f64> {
    Point::new(node.lon, node.lat)
}
