//! Shared fixtures for the end-to-end suite.
//!
//! Two kinds of drives are used across the tests: generated loops around the
//! demo route (realistic pacing, jittered fixes), and hand-built shuttle
//! runs on a north-south line through a gate (exact distances and times, so
//! assertions can be arithmetic rather than tolerance-based).

use openlap_config::{LapConfig, SimulatorConfig};
use openlap_engine::LapTimer;
use openlap_geo::{GeoPoint, Geofence};
use openlap_replay::RouteGenerator;
use openlap_schemas::TelemetrySample;

/// Start/finish gate on the demo route's start line.
pub fn route_gate() -> Geofence {
    Geofence::new(RouteGenerator::start_line(), 12.0)
}

/// Default engine settings with the demo-route gate installed.
pub fn gated_lap_config() -> LapConfig {
    LapConfig {
        geofence: Some(route_gate()),
        ..LapConfig::default()
    }
}

/// A timer ready to ingest demo-route drives.
pub fn route_timer() -> LapTimer {
    LapTimer::new(gated_lap_config())
}

/// Small, fast simulator settings. Eight fixes per leg keeps a full test
/// drive under a few hundred samples while the legs stay long enough that
/// only the start-line fixes land inside the gate.
pub fn quick_sim(seed: u64) -> SimulatorConfig {
    SimulatorConfig {
        laps: 2,
        samples_per_leg: 8,
        interval_ms: 2_000,
        jitter_deg: 0.000_01,
        seed,
    }
}

/// Latitude of the shuttle gate center.
pub const SHUTTLE_GATE_LAT: f64 = 40.744782;

/// Longitude of the shuttle gate center.
pub const SHUTTLE_GATE_LON: f64 = -74.027;

/// Roughly one meter of latitude, in degrees.
pub const METER_LAT: f64 = 0.000_009;

/// Gate used by the hand-built shuttle drives, ten meters wide.
pub fn shuttle_gate() -> Geofence {
    Geofence::new(GeoPoint::new(SHUTTLE_GATE_LAT, SHUTTLE_GATE_LON), 10.0)
}

/// Engine settings for shuttle drives: the shuttle gate plus defaults.
pub fn shuttle_lap_config() -> LapConfig {
    LapConfig {
        geofence: Some(shuttle_gate()),
        ..LapConfig::default()
    }
}

/// A fix `meters_north` of the shuttle gate center.
pub fn fix_north(timestamp_ms: u64, meters_north: f64) -> TelemetrySample {
    TelemetrySample::new(
        timestamp_ms,
        SHUTTLE_GATE_LAT + meters_north * METER_LAT,
        SHUTTLE_GATE_LON,
    )
}
