//! Prelude module for convenient error handling imports.
//!
//! This module re-exports the most commonly used types for error handling
//! in OpenLap.
//!
//! # Example
//!
//! ```
//! use openlap_errors::prelude::*;
//!
//! fn load_gate_radius(raw: f64) -> Result<f64> {
//!     if raw <= 0.0 {
//!         return Err(OpenLapError::config("gate radius must be positive"));
//!     }
//!     Ok(raw)
//! }
//!
//! assert!(load_gate_radius(10.0).is_ok());
//! assert!(load_gate_radius(0.0).is_err());
//! ```

pub use crate::{OpenLapError, Result, packet::PacketError, sample::SampleError};
