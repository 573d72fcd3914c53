//! The lap currently being timed.

use openlap_geo::{GeoPoint, haversine_m};
use openlap_schemas::{LapCheckpoint, LapRecord, TelemetrySample};

/// Distance and time advanced by one sample.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LapStep {
    /// Meters moved since the previous sample.
    pub step_m: f64,
    /// Milliseconds since the previous sample.
    pub interval_ms: u64,
}

/// Mutable state of the open lap.
///
/// Distance always accumulates on every accepted sample. Checkpoints are
/// pushed more sparingly: only when the incremental step exceeds the
/// configured epsilon, so stationary jitter does not bloat the polyline,
/// with one exception that guarantees a second point as soon as any motion
/// happens at all (the projector needs at least two points to interpolate).
#[derive(Debug, Clone)]
pub(crate) struct CurrentLap {
    lap_number: u32,
    start_time_ms: u64,
    last_position: GeoPoint,
    last_timestamp_ms: u64,
    distance_m: f64,
    checkpoints: Vec<LapCheckpoint>,
    started_on_line: bool,
}

impl CurrentLap {
    /// Opens a lap at `sample`. `started_on_line` records whether the open
    /// was a real gate crossing or the session bootstrap; only laps opened
    /// on the line may complete into history.
    pub(crate) fn open(lap_number: u32, sample: &TelemetrySample, started_on_line: bool) -> Self {
        Self {
            lap_number,
            start_time_ms: sample.timestamp_ms,
            last_position: sample.position(),
            last_timestamp_ms: sample.timestamp_ms,
            distance_m: 0.0,
            checkpoints: vec![LapCheckpoint::new(0, 0.0)],
            started_on_line,
        }
    }

    /// Folds one accepted sample into the lap.
    pub(crate) fn advance(&mut self, sample: &TelemetrySample, epsilon_m: f64) -> LapStep {
        let step_m = haversine_m(self.last_position, sample.position());
        let interval_ms = sample.timestamp_ms.saturating_sub(self.last_timestamp_ms);

        self.distance_m += step_m;
        self.last_position = sample.position();
        self.last_timestamp_ms = sample.timestamp_ms;

        let needs_second_point = self.checkpoints.len() < 2 && step_m > 0.0;
        if step_m > epsilon_m || needs_second_point {
            self.checkpoints
                .push(LapCheckpoint::new(self.elapsed_ms(), self.distance_m));
        }

        LapStep { step_m, interval_ms }
    }

    /// Milliseconds since the lap opened, as of the last accepted sample.
    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.last_timestamp_ms.saturating_sub(self.start_time_ms)
    }

    /// Meters traveled since the lap opened.
    pub(crate) fn distance_m(&self) -> f64 {
        self.distance_m
    }

    /// Number the lap will carry if it completes.
    pub(crate) fn lap_number(&self) -> u32 {
        self.lap_number
    }

    /// Unix milliseconds of the opening sample.
    pub(crate) fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    /// Whether the lap was opened by a gate crossing.
    pub(crate) fn started_on_line(&self) -> bool {
        self.started_on_line
    }

    /// The polyline recorded so far.
    pub(crate) fn checkpoints(&self) -> &[LapCheckpoint] {
        &self.checkpoints
    }

    /// Freezes the lap into an immutable record ending at `end_time_ms`.
    ///
    /// Guarantees the polyline terminates at exactly the record's own
    /// (elapsed, distance) pair, appending a terminal checkpoint when the
    /// last sample's step fell under the epsilon.
    pub(crate) fn close(mut self, end_time_ms: u64) -> LapRecord {
        let elapsed_ms = end_time_ms.saturating_sub(self.start_time_ms);

        let already_terminal = self.checkpoints.last().is_some_and(|last| {
            last.elapsed_ms == elapsed_ms && (last.distance_m - self.distance_m).abs() < 1e-9
        });
        if !already_terminal {
            self.checkpoints
                .push(LapCheckpoint::new(elapsed_ms, self.distance_m));
        }

        LapRecord {
            lap_number: self.lap_number,
            start_time_ms: self.start_time_ms,
            end_time_ms: Some(end_time_ms),
            elapsed_ms: Some(elapsed_ms),
            distance_m: self.distance_m,
            checkpoints: self.checkpoints,
        }
    }
}
