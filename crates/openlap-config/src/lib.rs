//! Configuration loading and validation for OpenLap.
//!
//! This crate combines:
//! - Lap engine tuning ([`LapConfig`]): gate placement, debounce, checkpoint density
//! - Synthetic drive tuning ([`SimulatorConfig`]): route shape, pacing, jitter
//!
//! Configuration lives in a single JSON file. Every field has a default, so
//! an empty object (or a missing file, via [`AppConfig::load_or_default`])
//! yields a fully working setup. Values are validated on load; a config that
//! parses but cannot work (zero sample interval, one-sample route legs) is
//! rejected early instead of surfacing as engine misbehavior mid-session.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use std::fs;
use std::path::Path;

use openlap_errors::{OpenLapError, Result};
use openlap_geo::Geofence;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const fn default_min_lap_duration_ms() -> u64 {
    8_000
}

const fn default_checkpoint_epsilon_m() -> f64 {
    2.0
}

const fn default_stationary_speed_mps() -> f64 {
    0.5
}

const fn default_outline_epsilon_m() -> f64 {
    5.0
}

const fn default_outline_max_points() -> usize {
    4_096
}

/// Lap engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapConfig {
    /// Start/finish gate. When absent the engine never detects a crossing,
    /// which is the safe state for an unconfigured track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geofence: Option<Geofence>,

    /// Minimum plausible lap time. Gate crossings earlier than this after
    /// the lap opened are treated as the same pass and ignored.
    #[serde(default = "default_min_lap_duration_ms")]
    pub min_lap_duration_ms: u64,

    /// Minimum distance step before a new checkpoint is recorded. Keeps
    /// idling at a stoplight from bloating the polyline.
    #[serde(default = "default_checkpoint_epsilon_m")]
    pub checkpoint_epsilon_m: f64,

    /// Speed below which the car counts as stationary for gate-crossing
    /// purposes. Filters out GPS drift while parked on the start line.
    #[serde(default = "default_stationary_speed_mps")]
    pub stationary_speed_mps: f64,

    /// Minimum spacing between recorded track outline points.
    #[serde(default = "default_outline_epsilon_m")]
    pub outline_epsilon_m: f64,

    /// Hard cap on stored outline points.
    #[serde(default = "default_outline_max_points")]
    pub outline_max_points: usize,
}

impl Default for LapConfig {
    fn default() -> Self {
        Self {
            geofence: None,
            min_lap_duration_ms: default_min_lap_duration_ms(),
            checkpoint_epsilon_m: default_checkpoint_epsilon_m(),
            stationary_speed_mps: default_stationary_speed_mps(),
            outline_epsilon_m: default_outline_epsilon_m(),
            outline_max_points: default_outline_max_points(),
        }
    }
}

const fn default_simulator_laps() -> u32 {
    3
}

const fn default_samples_per_leg() -> u32 {
    20
}

const fn default_interval_ms() -> u64 {
    1_000
}

const fn default_jitter_deg() -> f64 {
    0.000_02
}

const fn default_seed() -> u64 {
    7
}

/// Synthetic drive tuning for the route generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Number of loops around the route.
    #[serde(default = "default_simulator_laps")]
    pub laps: u32,

    /// Interpolated fixes per waypoint-to-waypoint leg. Must be at least 2
    /// so a leg has distinct start and end samples.
    #[serde(default = "default_samples_per_leg")]
    pub samples_per_leg: u32,

    /// Wall-clock spacing between generated fixes in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Uniform positional noise applied to each fix, in degrees.
    #[serde(default = "default_jitter_deg")]
    pub jitter_deg: f64,

    /// RNG seed. Runs with the same seed produce identical drives.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            laps: default_simulator_laps(),
            samples_per_leg: default_samples_per_leg(),
            interval_ms: default_interval_ms(),
            jitter_deg: default_jitter_deg(),
            seed: default_seed(),
        }
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Lap engine settings.
    #[serde(default)]
    pub lap: LapConfig,
    /// Synthetic drive settings.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

impl AppConfig {
    /// Loads and validates configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be read, a configuration
    /// error when it is not valid JSON for this schema or fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config: Self = match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                return Err(OpenLapError::config(format!(
                    "{} is not a valid config file: {e}",
                    path.display()
                )));
            }
        };
        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when the file does
    /// not exist. A file that exists but fails to parse is still an error.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`AppConfig::load`], except a missing file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Writes the configuration as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directories or file cannot be written,
    /// or a configuration error if serialization fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = match serde_json::to_string_pretty(self) {
            Ok(raw) => raw,
            Err(e) => {
                return Err(OpenLapError::config(format!(
                    "failed to serialize configuration: {e}"
                )));
            }
        };
        fs::write(path, raw)?;
        debug!(path = %path.display(), "Saved configuration file");
        Ok(())
    }

    /// Checks cross-field consistency rules.
    ///
    /// A degenerate geofence (radius zero or negative) is allowed but
    /// warned about: the engine treats it as a gate that never fires,
    /// which is rarely what the author of a config file meant.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if let Some(gate) = &self.lap.geofence
            && gate.radius_m <= 0.0
        {
            warn!(
                radius_m = gate.radius_m,
                "Geofence radius is not positive; the gate will never fire"
            );
        }
        if !self.lap.checkpoint_epsilon_m.is_finite() || self.lap.checkpoint_epsilon_m < 0.0 {
            return Err(OpenLapError::config(
                "lap.checkpoint_epsilon_m must be finite and non-negative",
            ));
        }
        if !self.lap.stationary_speed_mps.is_finite() || self.lap.stationary_speed_mps < 0.0 {
            return Err(OpenLapError::config(
                "lap.stationary_speed_mps must be finite and non-negative",
            ));
        }
        if !self.lap.outline_epsilon_m.is_finite() || self.lap.outline_epsilon_m <= 0.0 {
            return Err(OpenLapError::config(
                "lap.outline_epsilon_m must be finite and positive",
            ));
        }
        if self.lap.outline_max_points == 0 {
            return Err(OpenLapError::config(
                "lap.outline_max_points must be at least 1",
            ));
        }
        if self.simulator.laps == 0 {
            return Err(OpenLapError::config("simulator.laps must be at least 1"));
        }
        if self.simulator.samples_per_leg < 2 {
            return Err(OpenLapError::config(
                "simulator.samples_per_leg must be at least 2",
            ));
        }
        if self.simulator.interval_ms == 0 {
            return Err(OpenLapError::config(
                "simulator.interval_ms must be at least 1",
            ));
        }
        if !self.simulator.jitter_deg.is_finite() || self.simulator.jitter_deg < 0.0 {
            return Err(OpenLapError::config(
                "simulator.jitter_deg must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
