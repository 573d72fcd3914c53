//! Lap timing engine for GPS racing telemetry.
//!
//! The engine consumes a stream of positioned, timestamped samples and
//! turns it into racing state: detected start/finish crossings, completed
//! laps with distance polylines, a best-lap reference, and a live delta
//! projection telling the driver how the lap in progress compares to
//! their best at the same point on track.
//!
//! [`LapTimer`] is the only type most callers need:
//!
//! ```
//! use openlap_config::LapConfig;
//! use openlap_engine::LapTimer;
//! use openlap_geo::{GeoPoint, Geofence};
//! use openlap_schemas::TelemetrySample;
//!
//! let config = LapConfig {
//!     geofence: Some(Geofence::new(GeoPoint::new(40.744782, -74.027), 12.0)),
//!     ..LapConfig::default()
//! };
//! let mut timer = LapTimer::new(config);
//!
//! // The first sample opens a lap; nothing is complete yet.
//! let events = timer.ingest(&TelemetrySample::new(0, 40.7458, -74.027));
//! assert_eq!(events.len(), 1);
//! assert!(timer.laps().is_empty());
//! ```
//!
//! Everything is push-driven and synchronous: one [`LapTimer::ingest`]
//! call per sample, a `Vec<LapEvent>` back describing what changed.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod current_lap;
pub mod delta;
pub mod events;
pub mod history;
pub mod outline;
mod segmenter;
pub mod timer;
pub mod validate;

pub use delta::project;
pub use events::LapEvent;
pub use history::LapHistory;
pub use outline::TrackOutline;
pub use timer::LapTimer;
pub use validate::SampleValidator;

/// Convenience re-exports for downstream crates.
pub mod prelude {
    pub use crate::events::LapEvent;
    pub use crate::history::LapHistory;
    pub use crate::outline::TrackOutline;
    pub use crate::timer::LapTimer;
    pub use crate::validate::SampleValidator;
}
