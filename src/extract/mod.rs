//! The geodata extraction pipeline
//!
//! Stages run in dependency order: street clipping, intersection
//! detection and annotation, amenity normalization, POI assignment and
//! aggregation, street ranking, result assembly. Every stage is pure and
//! synchronous; only the external fetches are awaited, and a failed
//! fetch degrades to empty input for that source instead of failing the
//! request.

mod amenity;
mod assemble;
mod assign;
mod clip;
mod intersect;
mod rank;

use log::{info, warn};

use crate::error::Error;
use crate::fetch::{GeodataSource, RawAmenity, RawWay};
use crate::model::{BoundingBox, Coordinate, ProcessedResult};

/// Parameters of one extraction run
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest {
    pub center: Coordinate,
    pub radius_m: f64,
}

impl ExtractionRequest {
    /// Rejects out-of-range coordinates and non-positive radii
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when a precondition is violated.
    pub fn validate(&self) -> Result<(), Error> {
        if !(-90.0..=90.0).contains(&self.center.lat) {
            return Err(Error::InvalidRequest(format!(
                "latitude {} out of range [-90, 90]",
                self.center.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.center.lon) {
            return Err(Error::InvalidRequest(format!(
                "longitude {} out of range [-180, 180]",
                self.center.lon
            )));
        }
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(Error::InvalidRequest(format!(
                "radius {} m must be positive",
                self.radius_m
            )));
        }
        Ok(())
    }
}

/// Runs one full extraction: bounding box, external fetches, geometry
/// pipeline.
///
/// A failed street or amenity fetch is logged and treated as "no data"
/// for that source only; the other source is still processed. `Ok(None)`
/// means the location produced no content at all, letting the caller
/// skip generating a response.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] when the request parameters violate
/// their preconditions.
pub async fn extract_map_data<S>(
    source: &S,
    request: &ExtractionRequest,
) -> Result<Option<ProcessedResult>, Error>
where
    S: GeodataSource + ?Sized,
{
    request.validate()?;
    let bbox = BoundingBox::around(request.center, request.radius_m);

    let ways = match source.fetch_streets(&bbox).await {
        Ok(ways) => ways,
        Err(e) => {
            warn!("Street fetch failed, continuing without street data: {e}");
            Vec::new()
        }
    };
    let amenities = match source.fetch_amenities(&bbox).await {
        Ok(amenities) => amenities,
        Err(e) => {
            warn!("Amenity fetch failed, continuing without amenity data: {e}");
            Vec::new()
        }
    };

    Ok(process_geodata(&bbox, ways, amenities))
}

/// The synchronous geometry pipeline over already-fetched raw data.
/// Deterministic: identical input yields identical output.
pub fn process_geodata(
    bbox: &BoundingBox,
    ways: Vec<RawWay>,
    amenities: Vec<RawAmenity>,
) -> Option<ProcessedResult> {
    let raw_way_count = ways.len();
    let mut streets = clip::normalize_streets(bbox, ways);
    info!(
        "Clipped {} of {} raw ways into streets",
        streets.len(),
        raw_way_count
    );

    let records = intersect::find_intersections(&streets);
    intersect::annotate_intersections(&mut streets, &records);
    info!("{} streets participate in intersections", records.len());

    let pois = amenity::normalize_amenities(bbox, amenities);
    assign::assign_pois(&mut streets, &pois);
    let features = assign::aggregate_pois(&streets, pois);
    info!("Aggregated {} points of interest", features.len());

    rank::rank_streets(&mut streets);

    assemble::assemble(bbox, streets, features)
}
