//! Amenity and building feature normalization

use hashbrown::HashMap;

use crate::fetch::RawAmenity;
use crate::model::{BoundingBox, Poi};

/// Converts raw amenity features into POI records, keeping those whose
/// center lies inside the box and that carry a genuine category
pub fn normalize_amenities(bbox: &BoundingBox, raw: Vec<RawAmenity>) -> Vec<Poi> {
    raw.into_iter()
        .filter(|feature| bbox.contains(feature.lat, feature.lon))
        .filter_map(poi_from_feature)
        .collect()
}

fn poi_from_feature(feature: RawAmenity) -> Option<Poi> {
    let mut tags = feature.tags;
    let cat = category(&mut tags)?;
    let name = tags.remove("name");
    Some(Poi {
        id: feature.id,
        lat: feature.lat,
        lon: feature.lon,
        name,
        cat,
        other_tags: tags,
    })
}

/// `amenity` wins over `building`; a bare `building=yes` is reported as
/// the literal category `building`. Features with neither tag are not
/// points of interest.
fn category(tags: &mut HashMap<String, String>) -> Option<String> {
    if let Some(amenity) = tags.remove("amenity") {
        return Some(amenity);
    }
    tags.remove("building").map(|building| {
        if building == "yes" {
            "building".to_string()
        } else {
            building
        }
    })
}
