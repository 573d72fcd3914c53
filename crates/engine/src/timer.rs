//! Public entry point tying validation, lap detection, and the track
//! outline together behind one ingest call.

use openlap_config::LapConfig;
use openlap_geo::Geofence;
use openlap_schemas::{CurrentLapSnapshot, LapHistorySnapshot, LapRecord, TelemetrySample};
use tracing::{info, warn};

use crate::delta;
use crate::events::LapEvent;
use crate::outline::TrackOutline;
use crate::segmenter::LapSegmenter;
use crate::validate::SampleValidator;

/// Session-long lap timing engine.
///
/// Feed it validated-or-not GPS samples in arrival order via
/// [`LapTimer::ingest`]; it rejects bad ones, detects gate crossings,
/// maintains the lap history, and emits [`LapEvent`]s describing
/// everything that happened. All methods are synchronous and the type is
/// single-threaded by design; callers that share it across tasks wrap it
/// themselves.
#[derive(Debug)]
pub struct LapTimer {
    config: LapConfig,
    geofence: Option<Geofence>,
    validator: SampleValidator,
    segmenter: LapSegmenter,
    outline: TrackOutline,
}

impl LapTimer {
    /// Builds a timer from tuning parameters; the geofence may arrive
    /// later via [`LapTimer::set_geofence`].
    #[must_use]
    pub fn new(config: LapConfig) -> Self {
        let geofence = config.geofence;
        let segmenter = LapSegmenter::new(
            config.min_lap_duration_ms,
            config.checkpoint_epsilon_m,
            config.stationary_speed_mps,
        );
        let outline = TrackOutline::new(config.outline_epsilon_m, config.outline_max_points);
        Self {
            config,
            geofence,
            validator: SampleValidator::default(),
            segmenter,
            outline,
        }
    }

    /// Installs or replaces the start/finish gate.
    ///
    /// Takes effect from the next sample; the open lap and the zone latch
    /// are left alone, so moving the gate mid-lap cannot fabricate a
    /// crossing on its own.
    pub fn set_geofence(&mut self, geofence: Geofence) -> LapEvent {
        info!(
            lat_deg = geofence.center.lat_deg,
            lon_deg = geofence.center.lon_deg,
            radius_m = geofence.radius_m,
            "Start/finish gate updated"
        );
        self.geofence = Some(geofence);
        LapEvent::GeofenceUpdated { geofence }
    }

    /// The currently installed gate, if any.
    #[must_use]
    pub fn geofence(&self) -> Option<&Geofence> {
        self.geofence.as_ref()
    }

    /// The tuning parameters this timer was built with.
    #[must_use]
    pub fn config(&self) -> &LapConfig {
        &self.config
    }

    /// Processes one sample and reports what happened.
    ///
    /// A sample that fails validation is dropped in its entirety: it does
    /// not advance the lap, the outline, or the timestamp watermark, and
    /// the only event emitted is the rejection.
    pub fn ingest(&mut self, sample: &TelemetrySample) -> Vec<LapEvent> {
        if let Err(reason) = self.validator.check(sample) {
            warn!(
                timestamp_ms = sample.timestamp_ms,
                %reason,
                "Rejected telemetry sample"
            );
            return vec![LapEvent::SampleRejected { reason }];
        }
        self.outline.observe(sample.position());
        self.segmenter.ingest(sample, self.geofence.as_ref())
    }

    /// Completed laps, oldest first.
    #[must_use]
    pub fn laps(&self) -> &[LapRecord] {
        self.segmenter.history().laps()
    }

    /// The fastest completed lap, if any lap has a usable time.
    #[must_use]
    pub fn best_lap(&self) -> Option<&LapRecord> {
        self.segmenter.history().best_lap()
    }

    /// Index of the best lap within [`LapTimer::laps`].
    #[must_use]
    pub fn best_lap_index(&self) -> Option<usize> {
        self.segmenter.history().best_lap_index()
    }

    /// Live view of the lap in progress, including the projected delta to
    /// the best lap at the current distance.
    #[must_use]
    pub fn current_lap_snapshot(&self) -> Option<CurrentLapSnapshot> {
        let current = self.segmenter.current()?;
        let projected_delta_ms = delta::project(
            self.best_lap(),
            current.distance_m(),
            current.elapsed_ms(),
        );
        Some(CurrentLapSnapshot {
            lap_number: current.lap_number(),
            elapsed_ms: current.elapsed_ms(),
            distance_m: current.distance_m(),
            projected_delta_ms,
        })
    }

    /// Serializable dump of the completed-lap history.
    #[must_use]
    pub fn export_snapshot(&self) -> LapHistorySnapshot {
        self.segmenter.history().export_snapshot()
    }

    /// Replaces the lap history with previously exported records.
    ///
    /// The open lap is abandoned and the timestamp watermark cleared, so
    /// a replay of older telemetry can follow the import.
    pub fn restore(&mut self, laps: Vec<LapRecord>) {
        info!(lap_count = laps.len(), "Restoring lap history");
        self.segmenter.restore(laps);
        self.validator.reset();
    }

    /// Deletes all completed laps and abandons the lap in progress.
    pub fn clear_laps(&mut self) {
        info!("Clearing lap history");
        self.segmenter.clear();
        self.validator.reset();
    }

    /// Prepares for a new run: abandons the open lap, clears the zone
    /// latch and timestamp watermark, and keeps history and gate.
    pub fn reset(&mut self) {
        self.segmenter.reset();
        self.validator.reset();
    }

    /// Accumulated track outline for this session.
    #[must_use]
    pub fn track_outline(&self) -> &TrackOutline {
        &self.outline
    }
}
