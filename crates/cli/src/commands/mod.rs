//! Command implementations for lapctl

pub mod config;
pub mod laps;
pub mod replay;
pub mod simulate;

use clap::Subcommand;
use openlap_config::LapConfig;
use openlap_geo::Geofence;
use openlap_replay::RouteGenerator;
use std::path::PathBuf;

/// Gate radius in meters used when the configuration does not define one.
pub(crate) const DEFAULT_GATE_RADIUS_M: f64 = 12.0;

/// Fills in the demo-route gate when the configuration has none, so
/// simulate and replay time laps out of the box.
pub(crate) fn lap_config_with_gate(mut lap: LapConfig) -> LapConfig {
    if lap.geofence.is_none() {
        lap.geofence = Some(Geofence::new(
            RouteGenerator::start_line(),
            DEFAULT_GATE_RADIUS_M,
        ));
    }
    lap
}

#[derive(Subcommand)]
pub enum LapsCommands {
    /// Show the lap history stored in a file
    Show {
        /// Lap history file
        file: PathBuf,
    },

    /// Export the lap history to another file or stdout
    Export {
        /// Lap history file
        file: PathBuf,
        /// Destination file; prints to stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Import laps from an exported snapshot, replacing the history
    Import {
        /// Lap history file to write
        file: PathBuf,
        /// Snapshot to import
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },

    /// Delete all laps from a history file
    Clear {
        /// Lap history file
        file: PathBuf,
        /// Confirm deletion
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
