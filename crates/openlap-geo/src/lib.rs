//! Great-Circle Geometry for OpenLap
//!
//! This crate provides the geodesic primitives the lap engine is built on:
//! WGS-84 coordinate pairs, haversine distances on the mean-Earth sphere,
//! and the circular start/finish geofence test.
//!
//! # Overview
//!
//! The geometry layer supports:
//! - **Points**: `GeoPoint` latitude/longitude pairs in decimal degrees
//! - **Distances**: `haversine_m` great-circle distance in meters
//! - **Paths**: `path_length_m` cumulative polyline length
//! - **Gates**: `Geofence` circular containment with a degenerate-radius rule
//! - **Bounds**: `GeoBounds` axis-aligned extents for map rendering
//!
//! All distances use the mean Earth radius (6,371,000 m), which keeps
//! lap-to-lap deltas consistent even though absolute distances carry the
//! usual spherical-model error (well under 0.5% at track scale).
//!
//! # Example
//!
//! ```
//! use openlap_geo::{GeoPoint, Geofence, haversine_m};
//!
//! let start_line = Geofence::new(GeoPoint::new(40.744782, -74.027000), 10.0);
//! let car = GeoPoint::new(40.744790, -74.026995);
//!
//! assert!(start_line.contains(car));
//! assert!(haversine_m(start_line.center, car) <= start_line.radius_m);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod distance;
pub mod gate;
pub mod point;

pub use distance::{EARTH_RADIUS_M, haversine_m, path_length_m};
pub use gate::Geofence;
pub use point::{GeoBounds, GeoPoint};

/// Common imports for downstream crates.
pub mod prelude {
    pub use crate::distance::{haversine_m, path_length_m};
    pub use crate::gate::Geofence;
    pub use crate::point::{GeoBounds, GeoPoint};
}
