//! Centralized error types for OpenLap
//!
//! This crate provides a unified error handling system for the OpenLap
//! project, covering both streaming ingest (where bad input is routine and
//! recoverable) and file I/O paths (where failures abort the operation).
//!
//! # Architecture
//!
//! The error system is organized into a few modules:
//!
//! - [`sample`]: Validation failures for decoded telemetry samples
//! - [`packet`]: Decode failures for raw wire packets
//!
//! Ingest-path errors ([`SampleError`]) are plain-data enums that can be
//! cloned, compared, and serialized, because rejected samples surface as
//! events in the engine's output stream rather than aborting ingest.
//!
//! # Example
//!
//! ```
//! use openlap_errors::prelude::*;
//!
//! fn check_latitude(value: f64) -> Result<f64> {
//!     if !(-90.0..=90.0).contains(&value) {
//!         return Err(SampleError::LatitudeOutOfRange { value }.into());
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check_latitude(40.74).is_ok());
//! assert!(check_latitude(91.0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod packet;
pub mod prelude;
pub mod sample;

pub use packet::PacketError;
pub use sample::SampleError;

/// A specialized `Result` type for OpenLap operations.
pub type Result<T> = std::result::Result<T, OpenLapError>;

/// Top-level error type that can wrap all OpenLap sub-errors.
///
/// This enum provides a unified error type for the whole project, allowing
/// easy propagation with `?` across crate boundaries.
#[derive(Debug, thiserror::Error)]
pub enum OpenLapError {
    /// Telemetry sample validation errors
    #[error("invalid sample: {0}")]
    Sample(#[from] SampleError),

    /// Wire packet decode errors
    #[error("packet decode failed: {0}")]
    Packet(#[from] PacketError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl OpenLapError {
    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        OpenLapError::Config(msg.into())
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        OpenLapError::Other(msg.into())
    }
}

impl From<std::io::Error> for OpenLapError {
    fn from(e: std::io::Error) -> Self {
        OpenLapError::Io(e)
    }
}
