//! Coordinates and bounding-box calculation

use geo::Point;
use serde::Serialize;

use crate::EARTH_RADIUS_M;

/// Geographic coordinate in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Point with x = longitude, y = latitude
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Axis-aligned lat/lon rectangle used to scope geodata queries and to
/// clip their results. Derived once per request, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Rectangular bounds extending `radius_m` meters from `center` in
    /// every direction. A meter spans more degrees of longitude toward
    /// the poles, so the longitude delta grows with `1 / cos(lat)`.
    ///
    /// The center and radius are validated upstream by
    /// [`ExtractionRequest::validate`](crate::extract::ExtractionRequest::validate);
    /// this function itself is total over valid input.
    pub fn around(center: Coordinate, radius_m: f64) -> Self {
        let dlat = (radius_m / EARTH_RADIUS_M).to_degrees();
        let dlon = dlat / center.lat.to_radians().cos();
        Self {
            lat_min: center.lat - dlat,
            lon_min: center.lon - dlon,
            lat_max: center.lat + dlat,
            lon_max: center.lon + dlon,
        }
    }

    /// Closed-interval containment check; points exactly on a side count
    /// as inside
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

/// Min/max pair of one axis of the produced `bounds` object
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// `bounds` object of the produced result
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bounds {
    pub latitude: AxisRange,
    pub longitude: AxisRange,
}

impl From<&BoundingBox> for Bounds {
    fn from(bbox: &BoundingBox) -> Self {
        Self {
            latitude: AxisRange {
                min: bbox.lat_min,
                max: bbox.lat_max,
            },
            longitude: AxisRange {
                min: bbox.lon_min,
                max: bbox.lon_max,
            },
        }
    }
}
