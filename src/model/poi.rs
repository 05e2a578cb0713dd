//! Points of interest and the produced result envelope
//!
//! The working model keeps tags and intersection bookkeeping around while
//! the pipeline runs; the `*Feature` types here are the outbound shapes
//! with every working field stripped.

use geo::Point;
use hashbrown::HashMap;
use serde::Serialize;

use super::geometry::Bounds;
use super::street::{Node, NodeKind, Street};
use crate::{NodeId, PoiId, WayId};

/// Amenity or building feature inside the bounding box
#[derive(Debug, Clone, Serialize)]
pub struct Poi {
    pub id: PoiId,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Amenity or building category; always present for amenity POIs
    pub cat: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub other_tags: HashMap<String, String>,
}

impl Poi {
    /// Point with x = longitude, y = latitude
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Street node in the produced result: identity, position and owned
/// POIs only
#[derive(Debug, Serialize)]
pub struct NodeFeature {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub poi_ids: Vec<PoiId>,
}

impl From<&Node> for NodeFeature {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            lat: node.lat,
            lon: node.lon,
            node_type: node.node_type,
            poi_ids: node.poi_ids.clone(),
        }
    }
}

/// Street in the produced result; node order preserved, length dropped
#[derive(Debug, Serialize)]
pub struct StreetFeature {
    pub id: WayId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oneway: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lanes: Option<u32>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub other_tags: HashMap<String, String>,
    pub nodes: Vec<NodeFeature>,
}

impl From<&Street> for StreetFeature {
    fn from(street: &Street) -> Self {
        Self {
            id: street.id,
            name: street.name.clone(),
            kind: street.kind.clone(),
            oneway: street.oneway,
            lanes: street.lanes,
            other_tags: street.other_tags.clone(),
            nodes: street.nodes.iter().map(NodeFeature::from).collect(),
        }
    }
}

/// Street node promoted to a point of interest
#[derive(Debug, Serialize)]
pub struct IntersectionPoi {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersection: Option<(WayId, WayId)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub poi_ids: Vec<PoiId>,
}

impl From<&Node> for IntersectionPoi {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            lat: node.lat,
            lon: node.lon,
            name: node.name.clone(),
            cat: node.cat.clone(),
            intersection: node.intersection,
            poi_ids: node.poi_ids.clone(),
        }
    }
}

/// Entry of the `points_of_interest` array. Intersections and amenities
/// serialize as plain objects, distinguished by their fields.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PoiFeature {
    Intersection(IntersectionPoi),
    Amenity(Poi),
}

/// Final result of one extraction run. Keys with nothing to report are
/// omitted rather than serialized as empty arrays.
#[derive(Debug, Serialize)]
pub struct ProcessedResult {
    pub bounds: Bounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_of_interest: Option<Vec<PoiFeature>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streets: Option<Vec<StreetFeature>>,
}
