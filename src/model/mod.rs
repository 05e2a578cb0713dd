//! Data model for clipped street geometry and points of interest

pub mod geometry;
pub mod poi;
pub mod street;

pub use geometry::{AxisRange, BoundingBox, Bounds, Coordinate};
pub use poi::{IntersectionPoi, NodeFeature, Poi, PoiFeature, ProcessedResult, StreetFeature};
pub use street::{IntersectionRecord, Node, NodeKind, Street};
