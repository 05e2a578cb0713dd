//! Final result assembly: stripping working fields and shaping the
//! output envelope

use crate::model::{BoundingBox, Bounds, PoiFeature, ProcessedResult, Street, StreetFeature};

/// Builds the produced result. Keys with nothing to report are omitted
/// entirely, and a run with neither streets nor POIs yields `None` so
/// the caller can skip generating a response for the location.
pub fn assemble(
    bbox: &BoundingBox,
    streets: Vec<Street>,
    pois: Vec<PoiFeature>,
) -> Option<ProcessedResult> {
    if streets.is_empty() && pois.is_empty() {
        return None;
    }
    let streets = (!streets.is_empty())
        .then(|| streets.iter().map(StreetFeature::from).collect());
    let points_of_interest = (!pois.is_empty()).then_some(pois);
    Some(ProcessedResult {
        bounds: Bounds::from(bbox),
        points_of_interest,
        streets,
    })
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use super::*;
    use crate::model::{Node, Poi};

    fn bbox() -> BoundingBox {
        BoundingBox {
            lat_min: 45.000,
            lon_min: -73.600,
            lat_max: 45.002,
            lon_max: -73.598,
        }
    }

    fn one_street() -> Street {
        Street::from_way(
            1,
            HashMap::new(),
            vec![Node::new(1, 45.001, -73.599, HashMap::new())],
        )
    }

    fn one_poi() -> PoiFeature {
        PoiFeature::Amenity(Poi {
            id: 100,
            lat: 45.001,
            lon: -73.599,
            name: None,
            cat: "cafe".to_string(),
            other_tags: HashMap::new(),
        })
    }

    #[test]
    fn nothing_at_all_yields_no_content() {
        assert!(assemble(&bbox(), Vec::new(), Vec::new()).is_none());
    }

    #[test]
    fn amenities_survive_without_streets() {
        let result = assemble(&bbox(), Vec::new(), vec![one_poi()]).unwrap();
        assert!(result.streets.is_none());
        assert_eq!(result.points_of_interest.as_ref().unwrap().len(), 1);

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("streets").is_none());
        assert!(value.get("points_of_interest").is_some());
    }

    #[test]
    fn streets_survive_without_pois() {
        let result = assemble(&bbox(), vec![one_street()], Vec::new()).unwrap();
        assert!(result.points_of_interest.is_none());
        assert_eq!(result.streets.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn bounds_mirror_the_bounding_box() {
        let result = assemble(&bbox(), vec![one_street()], Vec::new()).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["bounds"]["latitude"]["min"], 45.000);
        assert_eq!(value["bounds"]["latitude"]["max"], 45.002);
        assert_eq!(value["bounds"]["longitude"]["min"], -73.600);
        assert_eq!(value["bounds"]["longitude"]["max"], -73.598);
    }
}
