//! DTOs for decoding Overpass JSON responses into raw records
//!
//! A street response carries `way` elements holding node-id references
//! and the referenced `node` elements side by side; ways are resolved
//! against that node table in one pass. An amenity response queried with
//! `out center` carries coordinates either inline (nodes) or in a
//! `center` object (ways, relations).

use hashbrown::HashMap;
use serde::Deserialize;

use super::{RawAmenity, RawNode, RawWay};

#[derive(Debug, Deserialize)]
pub(super) struct OverpassResponse {
    #[serde(default)]
    pub(super) elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElement {
    #[serde(rename = "type")]
    pub(super) element_type: String,
    pub(super) id: i64,
    pub(super) lat: Option<f64>,
    pub(super) lon: Option<f64>,
    pub(super) center: Option<OverpassCenter>,
    #[serde(default)]
    pub(super) nodes: Vec<i64>,
    #[serde(default)]
    pub(super) tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassCenter {
    pub(super) lat: f64,
    pub(super) lon: f64,
}

impl OverpassResponse {
    /// Resolves every way's node references against the response's node
    /// table. References missing from the table are skipped.
    pub(super) fn into_ways(self) -> Vec<RawWay> {
        let (nodes, rest): (Vec<_>, Vec<_>) = self
            .elements
            .into_iter()
            .partition(|e| e.element_type == "node");

        let table: HashMap<i64, RawNode> = nodes
            .into_iter()
            .filter_map(|e| {
                let (lat, lon) = e.coordinates()?;
                Some((
                    e.id,
                    RawNode {
                        id: e.id,
                        lat,
                        lon,
                        tags: e.tags,
                    },
                ))
            })
            .collect();

        rest.into_iter()
            .filter(|e| e.element_type == "way")
            .map(|e| RawWay {
                id: e.id,
                tags: e.tags,
                nodes: e
                    .nodes
                    .iter()
                    .filter_map(|id| table.get(id).cloned())
                    .collect(),
            })
            .collect()
    }

    /// Reduces every element to its center coordinate; elements without
    /// usable coordinates are skipped
    pub(super) fn into_amenities(self) -> Vec<RawAmenity> {
        self.elements
            .into_iter()
            .filter_map(|e| {
                let (lat, lon) = e.coordinates()?;
                Some(RawAmenity {
                    id: e.id,
                    lat,
                    lon,
                    tags: e.tags,
                })
            })
            .collect()
    }
}

impl OverpassElement {
    fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                let center = self.center.as_ref()?;
                (center.lat, center.lon)
            }
        };
        (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
    }
}
