//! Coordinate pairs and axis-aligned extents.

use serde::{Deserialize, Serialize};

/// A WGS-84 position in decimal degrees.
///
/// Latitude is positive north, longitude positive east. The type is plain
/// data: no normalization or range clamping happens here, validation lives
/// with the sample decoding layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, positive north.
    pub lat_deg: f64,
    /// Longitude in decimal degrees, positive east.
    pub lon_deg: f64,
}

impl GeoPoint {
    /// Creates a point from decimal-degree components.
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Axis-aligned latitude/longitude extents of a set of points.
///
/// Used by the track-outline recorder so a renderer can frame the circuit
/// without walking the whole polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Southernmost latitude in decimal degrees.
    pub min_lat_deg: f64,
    /// Northernmost latitude in decimal degrees.
    pub max_lat_deg: f64,
    /// Westernmost longitude in decimal degrees.
    pub min_lon_deg: f64,
    /// Easternmost longitude in decimal degrees.
    pub max_lon_deg: f64,
}

impl GeoBounds {
    /// Computes the extents of `points`, or `None` for an empty slice.
    ///
    /// Longitude extents are plain min/max, so a path crossing the
    /// antimeridian produces a bounding box spanning the long way around.
    /// Race tracks do not cross it.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let mut iter = points.iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min_lat_deg: first.lat_deg,
            max_lat_deg: first.lat_deg,
            min_lon_deg: first.lon_deg,
            max_lon_deg: first.lon_deg,
        };
        for p in iter {
            bounds.min_lat_deg = bounds.min_lat_deg.min(p.lat_deg);
            bounds.max_lat_deg = bounds.max_lat_deg.max(p.lat_deg);
            bounds.min_lon_deg = bounds.min_lon_deg.min(p.lon_deg);
            bounds.max_lon_deg = bounds.max_lon_deg.max(p.lon_deg);
        }
        Some(bounds)
    }

    /// Midpoint of the extents, suitable as a default map center.
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat_deg: (self.min_lat_deg + self.max_lat_deg) / 2.0,
            lon_deg: (self.min_lon_deg + self.max_lon_deg) / 2.0,
        }
    }
}
