//! Haversine distances on the mean-Earth sphere.

use crate::point::GeoPoint;

/// Mean Earth radius in meters.
///
/// The same constant must be used everywhere distances are produced, so
/// that checkpoint distances recorded on one lap stay comparable against
/// projections on the next.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters.
///
/// Uses the haversine formulation, which is numerically stable for the
/// short hops between consecutive GPS fixes where the naive spherical
/// law of cosines loses precision.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat_deg.to_radians();
    let lat_b = b.lat_deg.to_radians();
    let dlat = (b.lat_deg - a.lat_deg).to_radians();
    let dlon = (b.lon_deg - a.lon_deg).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can nudge h past 1.0 for near-antipodal pairs; clamp before asin.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Total length of a polyline in meters.
///
/// Returns `0.0` for slices with fewer than two points.
pub fn path_length_m(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .filter_map(|pair| match pair {
            [a, b] => Some(haversine_m(*a, *b)),
            _ => None,
        })
        .sum()
}
