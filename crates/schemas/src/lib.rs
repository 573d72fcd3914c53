//! Wire packets and domain models for OpenLap.
//!
//! This crate is the shared vocabulary of the project. The transmitter-side
//! wire format ([`packet::GpsPacket`]), the validated in-engine sample
//! ([`telemetry::TelemetrySample`]), and the lap records the engine produces
//! ([`lap::LapRecord`]) all live here so that the engine, the replay layer,
//! and the CLI agree on one set of shapes.
//!
//! # Modules
//!
//! - [`packet`]: Raw JSON packets as the GPS transmitter sends them
//! - [`telemetry`]: Decoded, coordinate-validated telemetry samples
//! - [`lap`]: Lap records, checkpoint polylines, and exported snapshots

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod lap;
pub mod packet;
pub mod telemetry;

pub use lap::{CurrentLapSnapshot, LapCheckpoint, LapHistorySnapshot, LapRecord};
pub use packet::{GpsPacket, ImuReading};
pub use telemetry::TelemetrySample;
