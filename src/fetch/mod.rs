//! Fetching raw street and amenity data from an external geodata query
//! service
//!
//! The pipeline consumes the service through the [`GeodataSource`] port.
//! [`OverpassClient`] is the production implementation: an Overpass-style
//! HTTP API queried with a bounded per-server timeout and a
//! deterministic, ordered fallback across a fixed endpoint list.

mod dto;
mod overpass;

pub use overpass::{DEFAULT_ENDPOINTS, OverpassClient};

use async_trait::async_trait;
use hashbrown::HashMap;

use crate::error::FetchError;
use crate::model::BoundingBox;
use crate::{NodeId, PoiId, WayId};

/// Raw node of a fetched way
#[derive(Debug, Clone)]
pub struct RawNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub tags: HashMap<String, String>,
}

/// Raw street way: way-level tags and the ordered member nodes
#[derive(Debug, Clone)]
pub struct RawWay {
    pub id: WayId,
    pub tags: HashMap<String, String>,
    pub nodes: Vec<RawNode>,
}

/// Raw amenity or building feature reduced to its center coordinate
#[derive(Debug, Clone)]
pub struct RawAmenity {
    pub id: PoiId,
    pub lat: f64,
    pub lon: f64,
    pub tags: HashMap<String, String>,
}

/// Source of raw geodata inside a bounding box
#[async_trait]
pub trait GeodataSource: Send + Sync {
    /// Street ways with their ordered node lists
    async fn fetch_streets(&self, bbox: &BoundingBox) -> Result<Vec<RawWay>, FetchError>;

    /// Amenity and building features
    async fn fetch_amenities(&self, bbox: &BoundingBox) -> Result<Vec<RawAmenity>, FetchError>;
}
