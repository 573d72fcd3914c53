//! Telemetry sample validation error types.
//!
//! These errors describe why a decoded sample was rejected before it
//! reached the lap engine. They are plain data on purpose: rejected
//! samples are reported as engine events and may be serialized into
//! session recordings, so every variant is cloneable and comparable.

use serde::{Deserialize, Serialize};

/// Sample validation error types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleError {
    /// Latitude outside the valid WGS-84 range
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// The invalid latitude in decimal degrees
        value: f64,
    },

    /// Longitude outside the valid WGS-84 range
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// The invalid longitude in decimal degrees
        value: f64,
    },

    /// A coordinate was NaN or infinite
    #[error("coordinate is not a finite number")]
    NonFiniteCoordinate,

    /// Timestamp earlier than the previously accepted sample
    #[error("timestamp {timestamp_ms} ms is earlier than previously accepted {previous_ms} ms")]
    TimestampRegression {
        /// Timestamp of the rejected sample, in Unix milliseconds
        timestamp_ms: u64,
        /// Timestamp of the last accepted sample, in Unix milliseconds
        previous_ms: u64,
    },
}
