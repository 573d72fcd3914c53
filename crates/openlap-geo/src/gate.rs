//! Circular start/finish gate.

use serde::{Deserialize, Serialize};

use crate::distance::haversine_m;
use crate::point::GeoPoint;

/// A circular geofence used as the start/finish line.
///
/// Containment is a plain distance test against the center. A gate with a
/// non-positive radius is degenerate and contains nothing, which is how a
/// misconfigured or cleared gate stays inert instead of firing on every
/// sample near its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    /// Center of the gate.
    pub center: GeoPoint,
    /// Radius in meters. Non-positive radii never contain any point.
    pub radius_m: f64,
}

impl Geofence {
    /// Creates a gate from a center and radius in meters.
    pub const fn new(center: GeoPoint, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    /// Whether `point` lies inside the gate.
    ///
    /// The boundary counts as inside. Degenerate gates (radius zero or
    /// negative) return `false` for every point, including their own center.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.radius_m > 0.0 && haversine_m(self.center, point) <= self.radius_m
    }
}
