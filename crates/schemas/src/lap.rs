//! Lap records, checkpoint polylines, and exported snapshots.
//!
//! A lap is recorded as a monotonic polyline of (elapsed time, cumulative
//! distance) checkpoints. The polyline is what makes delta projection
//! possible: given how far the car has traveled on the current lap, the
//! best lap's polyline answers "how long did that distance take last time".

use serde::{Deserialize, Serialize};

/// One point on a lap's time/distance curve.
///
/// Checkpoints are appended in driving order, so within a lap both fields
/// are non-decreasing and the first checkpoint is always (0, 0.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapCheckpoint {
    /// Milliseconds since the lap opened.
    pub elapsed_ms: u64,
    /// Meters traveled since the lap opened.
    pub distance_m: f64,
}

impl LapCheckpoint {
    /// Creates a checkpoint.
    pub const fn new(elapsed_ms: u64, distance_m: f64) -> Self {
        Self {
            elapsed_ms,
            distance_m,
        }
    }
}

/// A completed (or restored) lap.
///
/// Records produced by the engine always have `end_time_ms` and
/// `elapsed_ms` filled in and a checkpoint polyline whose last entry equals
/// (`elapsed_ms`, `distance_m`). Records loaded from external files may be
/// missing those fields; such laps are retained in history but never
/// considered for the best-lap slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// 1-based position in the session's completed-lap sequence.
    pub lap_number: u32,

    /// Unix milliseconds of the gate crossing that opened the lap.
    pub start_time_ms: u64,

    /// Unix milliseconds of the gate crossing that closed the lap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time_ms: Option<u64>,

    /// Total lap time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,

    /// Total distance traveled over the lap in meters.
    pub distance_m: f64,

    /// Time/distance curve sampled along the lap.
    #[serde(default)]
    pub checkpoints: Vec<LapCheckpoint>,
}

impl LapRecord {
    /// Whether this record carries complete timing data.
    ///
    /// Incomplete records can only enter history through [`restore`]
    /// payloads; the engine itself never produces one.
    ///
    /// [`restore`]: LapHistorySnapshot
    pub const fn is_complete(&self) -> bool {
        self.elapsed_ms.is_some() && self.end_time_ms.is_some()
    }
}

/// Live view of the lap in progress.
///
/// Produced on demand for dashboards; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentLapSnapshot {
    /// Number the lap will carry if it completes.
    pub lap_number: u32,
    /// Milliseconds since the lap opened.
    pub elapsed_ms: u64,
    /// Meters traveled since the lap opened.
    pub distance_m: f64,
    /// Projected gap to the best lap at this distance, positive when
    /// slower. Absent until a best lap exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_delta_ms: Option<i64>,
}

/// Serializable export of the completed-lap history.
///
/// This is the persistence format: what `laps export` writes and what
/// `laps import` feeds back through restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapHistorySnapshot {
    /// Completed laps in completion order.
    pub laps: Vec<LapRecord>,
    /// Index into `laps` of the fastest complete lap, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_lap_index: Option<usize>,
}
