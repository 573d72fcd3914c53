//! Track outline recording.
//!
//! The outline is a decimated trace of everywhere the car has been this
//! session, independent of lap boundaries. A map view draws it to show the
//! circuit shape without needing survey data. Points are kept only when
//! they are far enough from the previous kept point, and recording stops
//! at a hard cap so a long session cannot grow memory without bound.

use openlap_geo::{GeoBounds, GeoPoint, haversine_m, path_length_m};

/// Decimated polyline of the driven track.
#[derive(Debug, Clone)]
pub struct TrackOutline {
    points: Vec<GeoPoint>,
    epsilon_m: f64,
    max_points: usize,
}

impl TrackOutline {
    /// Creates an empty outline keeping points at least `epsilon_m` apart,
    /// up to `max_points`.
    pub fn new(epsilon_m: f64, max_points: usize) -> Self {
        Self {
            points: Vec::new(),
            epsilon_m,
            max_points,
        }
    }

    /// Offers a position to the outline. Returns whether it was kept.
    pub fn observe(&mut self, position: GeoPoint) -> bool {
        if self.points.len() >= self.max_points {
            return false;
        }
        let far_enough = match self.points.last() {
            None => true,
            Some(last) => haversine_m(*last, position) >= self.epsilon_m,
        };
        if far_enough {
            self.points.push(position);
        }
        far_enough
    }

    /// The kept points in driving order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Number of kept points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether nothing has been kept yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length of the kept polyline in meters.
    pub fn length_m(&self) -> f64 {
        path_length_m(&self.points)
    }

    /// Extents of the kept points, for framing a map view.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(&self.points)
    }

    /// Discards all kept points.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
