//! Bounding-box street and amenity extraction from OpenStreetMap data
//!
//! Given a center coordinate and a search radius, this crate computes a
//! rectangular bounding box, fetches raw street ways and amenity features
//! from an Overpass-style query service, clips each street to the box
//! (synthesizing boundary nodes where a street only partially enters it),
//! detects street-to-street intersections, merges intersections and
//! amenities into a single point-of-interest list, assigns every point of
//! interest to its owning street node and emits a structured
//! `{bounds, points_of_interest, streets}` result.
//!
//! Processing is per-request and stateless: nothing outlives one call to
//! [`extract_map_data`].

pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod prelude;

pub use error::{Error, FetchError};
pub use extract::{ExtractionRequest, extract_map_data, process_geodata};

/// OSM node identifier
pub type NodeId = i64;
/// OSM way identifier
pub type WayId = i64;
/// Identifier of a point of interest (a node id or an amenity feature id)
pub type PoiId = i64;

/// Mean Earth radius in meters, used to convert a search radius into
/// degrees of latitude and longitude
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
