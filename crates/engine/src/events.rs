//! Domain events emitted by the lap engine.
//!
//! Every call to [`ingest`] returns the events that sample produced, in
//! order. Hosts render them live, and the session recorder persists them
//! verbatim, so the enum is serializable and tagged for forward-compatible
//! JSON.
//!
//! [`ingest`]: crate::timer::LapTimer::ingest

use openlap_errors::SampleError;
use openlap_geo::Geofence;
use openlap_schemas::LapRecord;
use serde::{Deserialize, Serialize};

/// One observable engine occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LapEvent {
    /// A lap started timing. Emitted on the bootstrap open and after every
    /// completed crossing.
    LapOpened {
        /// Number the lap will carry if it completes.
        lap_number: u32,
        /// Unix milliseconds of the opening sample.
        start_time_ms: u64,
    },

    /// The drive from the session start to the first gate crossing ended.
    /// That stretch is not a lap and is not recorded in history.
    OutlapDiscarded {
        /// Unix milliseconds of the session's first sample.
        start_time_ms: u64,
        /// Unix milliseconds of the crossing that ended the stretch.
        end_time_ms: u64,
    },

    /// A lap closed at the gate and entered history.
    LapCompleted {
        /// The completed record as it was appended.
        record: LapRecord,
        /// Final gap to the best lap that existed before this one,
        /// positive when slower. Zero for the session's first lap.
        delta_to_best_ms: i64,
        /// Whether this lap became the new best.
        new_best: bool,
    },

    /// A sample failed validation and was dropped without touching state.
    SampleRejected {
        /// Why the sample was rejected.
        reason: SampleError,
    },

    /// The start/finish gate was set or replaced.
    GeofenceUpdated {
        /// The gate now in effect.
        geofence: Geofence,
    },
}
