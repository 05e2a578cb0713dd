//! Street and node records built from raw way data
//!
//! Well-known way tags are promoted to typed fields exactly once at
//! construction; the remaining tags ride along untouched in `other_tags`.

use geo::Point;
use hashbrown::HashMap;
use serde::Serialize;

use crate::{NodeId, PoiId, WayId};

/// Marker for nodes synthesized by boundary interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Displaced,
}

/// A single geographic point of a way
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    /// Raw OSM tags; always empty for displaced nodes
    pub tags: HashMap<String, String>,
    pub node_type: Option<NodeKind>,
    /// Human-readable label written by the intersection annotator
    pub name: Option<String>,
    /// Road-classification category written by the intersection annotator
    pub cat: Option<String>,
    /// Pair of street ids meeting at this node
    pub intersection: Option<(WayId, WayId)>,
    /// Points of interest owned by this node, ordered and deduplicated
    pub poi_ids: Vec<PoiId>,
}

impl Node {
    pub fn new(id: NodeId, lat: f64, lon: f64, tags: HashMap<String, String>) -> Self {
        Self {
            id,
            lat,
            lon,
            tags,
            node_type: None,
            name: None,
            cat: None,
            intersection: None,
            poi_ids: Vec::new(),
        }
    }

    /// Node synthesized on the bounding-box perimeter. It carries the id
    /// of the outside neighbour it displaces and no tags.
    pub fn displaced(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            node_type: Some(NodeKind::Displaced),
            ..Self::new(id, lat, lon, HashMap::new())
        }
    }

    /// Point with x = longitude, y = latitude
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Identity comparison: same source id and bitwise-equal coordinates.
    /// A displaced copy of a node never matches its source.
    pub fn same_identity(&self, other: &Node) -> bool {
        self.id == other.id
            && self.lat.to_bits() == other.lat.to_bits()
            && self.lon.to_bits() == other.lon.to_bits()
    }

    /// Attaches a POI id, keeping `poi_ids` ordered and deduplicated
    pub fn attach_poi(&mut self, poi: PoiId) {
        if !self.poi_ids.contains(&poi) {
            self.poi_ids.push(poi);
        }
    }
}

/// An ordered path of nodes representing a road segment. Node order is
/// the path order along the street.
#[derive(Debug, Clone)]
pub struct Street {
    pub id: WayId,
    pub name: Option<String>,
    /// Road classification from the way-level `highway` tag
    pub kind: Option<String>,
    pub oneway: Option<bool>,
    pub lanes: Option<u32>,
    pub other_tags: HashMap<String, String>,
    pub nodes: Vec<Node>,
    /// Total clipped length in meters; working field of the ranker,
    /// never serialized
    pub length_m: f64,
}

impl Street {
    /// Builds a street from way-level tags, promoting the well-known
    /// keys (`name`, `highway`, `oneway`, `lanes`) to typed fields
    pub fn from_way(id: WayId, mut tags: HashMap<String, String>, nodes: Vec<Node>) -> Self {
        let name = tags.remove("name");
        let kind = tags.remove("highway");
        let oneway = tags.remove("oneway").and_then(|v| match v.as_str() {
            "yes" | "true" | "1" => Some(true),
            "no" => Some(false),
            _ => None,
        });
        let lanes = tags.remove("lanes").and_then(|v| v.parse().ok());
        Self {
            id,
            name,
            kind,
            oneway,
            lanes,
            other_tags: tags,
            nodes,
            length_m: 0.0,
        }
    }

    /// Label used when this street participates in an intersection name:
    /// street name, else road classification, else the way id
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.kind.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Per-street record of the nodes it shares with at least one other
/// street. Records for the same street are merged and their nodes
/// deduplicated before annotation.
#[derive(Debug, Clone)]
pub struct IntersectionRecord {
    pub street_id: WayId,
    /// Street name, else road classification; `None` when the way
    /// carries neither
    pub label: Option<String>,
    pub nodes: Vec<Node>,
}
