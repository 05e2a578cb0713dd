// Re-export of key components
pub use crate::error::{Error, FetchError};
pub use crate::extract::{ExtractionRequest, extract_map_data, process_geodata};
pub use crate::fetch::{GeodataSource, OverpassClient, RawAmenity, RawNode, RawWay};
pub use crate::model::{
    BoundingBox, Coordinate, Node, Poi, PoiFeature, ProcessedResult, Street,
};

// Identifier aliases and geometry constants
pub use crate::{EARTH_RADIUS_M, NodeId, PoiId, WayId};
