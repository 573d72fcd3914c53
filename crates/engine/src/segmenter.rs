//! Gate-crossing detection and lap lifecycle.
//!
//! The segmenter is a two-state machine: either no lap is open (only
//! before the first sample, or right after a reset) or exactly one lap is
//! open. A lap closes on a rising gate edge, and the closing sample
//! simultaneously opens the next lap, so timing has no gaps.
//!
//! Three filters sit between the raw inside/outside classification and an
//! accepted crossing:
//!
//! - the zone latch: only an outside-to-inside transition counts, so a car
//!   dwelling in the gate radius fires exactly once per visit
//! - the debounce window: an edge arriving implausibly soon after the lap
//!   opened is GPS noise at the gate boundary, not a real lap
//! - the motion guard: a parked car jittering across the boundary is not
//!   crossing the line

use openlap_geo::Geofence;
use openlap_schemas::{LapRecord, TelemetrySample};
use tracing::debug;

use crate::current_lap::{CurrentLap, LapStep};
use crate::delta;
use crate::events::LapEvent;
use crate::history::LapHistory;

/// Lap detection state machine and owner of the lap history.
#[derive(Debug)]
pub(crate) struct LapSegmenter {
    min_lap_duration_ms: u64,
    checkpoint_epsilon_m: f64,
    stationary_speed_mps: f64,
    current: Option<CurrentLap>,
    was_inside_gate: bool,
    next_lap_number: u32,
    history: LapHistory,
}

impl LapSegmenter {
    pub(crate) fn new(
        min_lap_duration_ms: u64,
        checkpoint_epsilon_m: f64,
        stationary_speed_mps: f64,
    ) -> Self {
        Self {
            min_lap_duration_ms,
            checkpoint_epsilon_m,
            stationary_speed_mps,
            current: None,
            was_inside_gate: false,
            next_lap_number: 1,
            history: LapHistory::new(),
        }
    }

    /// Folds one validated sample into the session.
    ///
    /// The first sample opens a lap silently: the car starts somewhere on
    /// track, not necessarily on the line, so that stretch is an outlap
    /// that will be discarded at the first real crossing rather than
    /// recorded as a lap.
    pub(crate) fn ingest(
        &mut self,
        sample: &TelemetrySample,
        gate: Option<&Geofence>,
    ) -> Vec<LapEvent> {
        let inside_now = gate.is_some_and(|g| g.contains(sample.position()));
        let mut events = Vec::new();

        let step = match self.current.as_mut() {
            None => {
                let lap = CurrentLap::open(self.next_lap_number, sample, false);
                debug!(
                    lap_number = lap.lap_number(),
                    start_time_ms = lap.start_time_ms(),
                    "Opened bootstrap lap at first sample"
                );
                events.push(LapEvent::LapOpened {
                    lap_number: lap.lap_number(),
                    start_time_ms: lap.start_time_ms(),
                });
                self.current = Some(lap);
                self.was_inside_gate = inside_now;
                return events;
            }
            Some(current) => current.advance(sample, self.checkpoint_epsilon_m),
        };

        let rising_edge = inside_now && !self.was_inside_gate;
        if rising_edge && Self::is_moving(step, self.stationary_speed_mps) {
            self.handle_crossing(sample, &mut events);
        }

        // The latch always tracks the latest classification, including
        // during debounced or stationary-suppressed edges: one dwell
        // inside the gate must produce at most one edge.
        self.was_inside_gate = inside_now;
        events
    }

    fn handle_crossing(&mut self, sample: &TelemetrySample, events: &mut Vec<LapEvent>) {
        let elapsed_ms = self.current.as_ref().map_or(0, CurrentLap::elapsed_ms);
        if elapsed_ms < self.min_lap_duration_ms {
            debug!(
                elapsed_ms,
                min_lap_duration_ms = self.min_lap_duration_ms,
                "Gate edge within debounce window; lap stays open"
            );
            return;
        }

        let Some(open) = self.current.take() else {
            return;
        };

        if open.started_on_line() {
            let lap_elapsed_ms = open.elapsed_ms();
            let record = open.close(sample.timestamp_ms);
            let delta_to_best_ms =
                delta::project(self.history.best_lap(), record.distance_m, lap_elapsed_ms)
                    .unwrap_or(0);
            let new_best = self.history.append(record.clone());
            self.next_lap_number = record.lap_number.saturating_add(1);
            debug!(
                lap_number = record.lap_number,
                elapsed_ms = lap_elapsed_ms,
                distance_m = record.distance_m,
                delta_to_best_ms,
                new_best,
                "Lap completed"
            );
            events.push(LapEvent::LapCompleted {
                record,
                delta_to_best_ms,
                new_best,
            });
        } else {
            debug!(
                start_time_ms = open.start_time_ms(),
                end_time_ms = sample.timestamp_ms,
                "First gate crossing; discarding outlap"
            );
            events.push(LapEvent::OutlapDiscarded {
                start_time_ms: open.start_time_ms(),
                end_time_ms: sample.timestamp_ms,
            });
        }

        let lap = CurrentLap::open(self.next_lap_number, sample, true);
        events.push(LapEvent::LapOpened {
            lap_number: lap.lap_number(),
            start_time_ms: lap.start_time_ms(),
        });
        self.current = Some(lap);
    }

    fn is_moving(step: LapStep, threshold_mps: f64) -> bool {
        if step.interval_ms == 0 {
            return step.step_m > 0.0;
        }
        let speed_mps = step.step_m * 1_000.0 / step.interval_ms as f64;
        speed_mps >= threshold_mps
    }

    pub(crate) fn current(&self) -> Option<&CurrentLap> {
        self.current.as_ref()
    }

    pub(crate) fn history(&self) -> &LapHistory {
        &self.history
    }

    /// Replaces history wholesale and abandons the open lap; the next
    /// sample bootstraps a fresh one. Future lap numbers continue after
    /// the highest restored number.
    pub(crate) fn restore(&mut self, laps: Vec<LapRecord>) {
        self.history.restore(laps);
        self.current = None;
        self.was_inside_gate = false;
        self.next_lap_number = self
            .history
            .laps()
            .iter()
            .map(|lap| lap.lap_number)
            .max()
            .map_or(1, |highest| highest.saturating_add(1));
    }

    /// Atomically wipes history and in-progress state.
    pub(crate) fn clear(&mut self) {
        self.history.clear();
        self.current = None;
        self.was_inside_gate = false;
        self.next_lap_number = 1;
    }

    /// Abandons the open lap and zone latch, keeping history intact.
    pub(crate) fn reset(&mut self) {
        self.current = None;
        self.was_inside_gate = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openlap_geo::GeoPoint;

    const GATE_LAT: f64 = 40.744782;
    const GATE_LON: f64 = -74.027;
    const DEBOUNCE_MS: u64 = 8_000;

    fn gate() -> Geofence {
        Geofence::new(GeoPoint::new(GATE_LAT, GATE_LON), 10.0)
    }

    fn segmenter() -> LapSegmenter {
        LapSegmenter::new(DEBOUNCE_MS, 2.0, 0.5)
    }

    fn sample(timestamp_ms: u64, lat_deg: f64) -> TelemetrySample {
        TelemetrySample::new(timestamp_ms, lat_deg, GATE_LON)
    }

    /// ~113 m north of the gate center.
    fn far(timestamp_ms: u64) -> TelemetrySample {
        sample(timestamp_ms, GATE_LAT + 0.001)
    }

    /// Dead center of the gate.
    fn center(timestamp_ms: u64) -> TelemetrySample {
        sample(timestamp_ms, GATE_LAT)
    }

    fn completed_laps(events: &[LapEvent]) -> Vec<(u32, u64)> {
        events
            .iter()
            .filter_map(|event| match event {
                LapEvent::LapCompleted { record, .. } => {
                    Some((record.lap_number, record.elapsed_ms.unwrap_or(0)))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn alternating_visits_produce_laps_after_the_outlap() {
        // Scenario: drive to the gate, then two full laps, each gate visit
        // 20 seconds after the previous one.
        let mut seg = segmenter();
        let g = gate();
        let mut all_events = Vec::new();

        for s in [
            far(1_000),
            center(20_000),
            far(30_000),
            center(40_000),
            far(50_000),
            center(60_000),
        ] {
            all_events.extend(seg.ingest(&s, Some(&g)));
        }

        assert_eq!(
            completed_laps(&all_events),
            vec![(1, 20_000), (2, 20_000)],
            "two real laps of 20 s each"
        );
        assert_eq!(seg.history().len(), 2);

        let discards: Vec<_> = all_events
            .iter()
            .filter(|e| matches!(e, LapEvent::OutlapDiscarded { .. }))
            .collect();
        assert_eq!(discards.len(), 1, "the drive to the line is not a lap");
        assert_eq!(
            all_events.first(),
            Some(&LapEvent::LapOpened {
                lap_number: 1,
                start_time_ms: 1_000
            })
        );
    }

    #[test]
    fn dwelling_inside_the_gate_fires_once() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        let entry = seg.ingest(&center(20_000), Some(&g));
        assert!(
            entry
                .iter()
                .any(|e| matches!(e, LapEvent::OutlapDiscarded { .. }))
        );

        // Still inside for several samples: no further edges, no laps.
        for t in [21_000u64, 22_000, 23_000] {
            let events = seg.ingest(&sample(t, GATE_LAT + 0.000_01), Some(&g));
            assert!(events.is_empty(), "dwell sample at {t} produced events");
        }
        assert_eq!(seg.history().len(), 0);
    }

    #[test]
    fn edge_within_debounce_window_keeps_the_lap_open() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        // Reaches the gate only 2 s in: implausible, ignored.
        let events = seg.ingest(&center(2_000), Some(&g));
        assert!(events.is_empty());
        // Still inside 2 s later.
        let events = seg.ingest(&sample(4_000, GATE_LAT + 0.000_01), Some(&g));
        assert!(events.is_empty());

        assert_eq!(seg.history().len(), 0);
        let Some(current) = seg.current() else {
            panic!("lap must remain open through a debounced edge");
        };
        assert_eq!(current.start_time_ms(), 0);
        assert!(
            current.checkpoints().len() >= 2,
            "polyline keeps growing while the lap stays open"
        );
    }

    #[test]
    fn debounced_edge_consumes_the_visit() {
        // The latch updates even when the edge is ignored, so the same
        // dwell cannot complete a lap a sample later.
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        seg.ingest(&center(2_000), Some(&g));
        // 9 s in, still inside from the same visit: no edge.
        let events = seg.ingest(&sample(9_000, GATE_LAT + 0.000_01), Some(&g));
        assert!(events.is_empty());
        assert_eq!(seg.history().len(), 0);
    }

    #[test]
    fn lap_numbers_increase_by_one_from_one() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        let mut t = 20_000u64;
        let mut all_events = Vec::new();
        for _ in 0..4 {
            all_events.extend(seg.ingest(&center(t), Some(&g)));
            all_events.extend(seg.ingest(&far(t + 10_000), Some(&g)));
            t += 20_000;
        }

        let numbers: Vec<u32> = completed_laps(&all_events)
            .iter()
            .map(|&(n, _)| n)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn first_lap_reports_zero_delta_and_becomes_best() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        seg.ingest(&center(20_000), Some(&g));
        seg.ingest(&far(30_000), Some(&g));
        let events = seg.ingest(&center(40_000), Some(&g));

        let Some(LapEvent::LapCompleted {
            delta_to_best_ms,
            new_best,
            ..
        }) = events.first()
        else {
            panic!("expected a completed lap");
        };
        assert_eq!(*delta_to_best_ms, 0);
        assert!(*new_best);
    }

    #[test]
    fn slower_second_lap_reports_positive_delta() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        seg.ingest(&center(20_000), Some(&g));
        seg.ingest(&far(30_000), Some(&g));
        seg.ingest(&center(40_000), Some(&g));
        seg.ingest(&far(50_000), Some(&g));
        // Second lap takes 25 s over the same ground.
        let events = seg.ingest(&center(65_000), Some(&g));

        let Some(LapEvent::LapCompleted {
            delta_to_best_ms,
            new_best,
            ..
        }) = events.first()
        else {
            panic!("expected a completed lap");
        };
        assert_eq!(*delta_to_best_ms, 5_000);
        assert!(!*new_best);
        assert_eq!(seg.history().best_lap_index(), Some(0));
    }

    #[test]
    fn stationary_jitter_across_the_boundary_is_not_a_crossing() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        // Park just outside the radius (~11 m out).
        seg.ingest(&sample(20_000, GATE_LAT + 0.000_099), Some(&g));
        // Creep 1.5 m over 15 s: 0.1 m/s, a parked car's GPS drift.
        let events = seg.ingest(&sample(35_000, GATE_LAT + 0.000_085), Some(&g));
        assert!(events.is_empty(), "drift into the gate must not fire");
        assert_eq!(seg.history().len(), 0);

        // Drive away and return at speed: that is a real crossing.
        seg.ingest(&far(45_000), Some(&g));
        let events = seg.ingest(&center(65_000), Some(&g));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, LapEvent::OutlapDiscarded { .. }))
        );
    }

    #[test]
    fn no_gate_means_no_crossings() {
        let mut seg = segmenter();

        let first = seg.ingest(&far(0), None);
        assert_eq!(first.len(), 1, "only the bootstrap open");
        for t in 1..10u64 {
            let events = seg.ingest(&center(t * 20_000), None);
            assert!(events.is_empty());
        }
        assert_eq!(seg.history().len(), 0);
    }

    #[test]
    fn clear_wipes_history_and_open_lap_atomically() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        seg.ingest(&center(20_000), Some(&g));
        seg.ingest(&far(30_000), Some(&g));
        seg.ingest(&center(40_000), Some(&g));
        assert_eq!(seg.history().len(), 1);

        seg.clear();
        assert_eq!(seg.history().len(), 0);
        assert!(seg.current().is_none());

        // Numbering restarts at 1.
        seg.ingest(&far(100_000), Some(&g));
        seg.ingest(&center(120_000), Some(&g));
        seg.ingest(&far(130_000), Some(&g));
        let events = seg.ingest(&center(140_000), Some(&g));
        assert_eq!(completed_laps(&events), vec![(1, 20_000)]);
    }

    #[test]
    fn restore_continues_numbering_after_the_highest_import() {
        let mut seg = segmenter();
        let g = gate();

        let imported = vec![LapRecord {
            lap_number: 7,
            start_time_ms: 0,
            end_time_ms: Some(30_000),
            elapsed_ms: Some(30_000),
            distance_m: 500.0,
            checkpoints: Vec::new(),
        }];
        seg.restore(imported);
        assert_eq!(seg.history().len(), 1);
        assert!(seg.current().is_none());

        seg.ingest(&far(200_000), Some(&g));
        seg.ingest(&center(220_000), Some(&g));
        seg.ingest(&far(230_000), Some(&g));
        let events = seg.ingest(&center(240_000), Some(&g));
        assert_eq!(completed_laps(&events), vec![(8, 20_000)]);
    }

    #[test]
    fn reset_abandons_the_open_lap_but_keeps_history() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        seg.ingest(&center(20_000), Some(&g));
        seg.ingest(&far(30_000), Some(&g));
        seg.ingest(&center(40_000), Some(&g));
        assert_eq!(seg.history().len(), 1);

        seg.reset();
        assert!(seg.current().is_none());
        assert_eq!(seg.history().len(), 1, "history survives a reset");

        // Next sample bootstraps a new outlap.
        let events = seg.ingest(&far(50_000), Some(&g));
        assert!(matches!(
            events.first(),
            Some(LapEvent::LapOpened { lap_number: 2, .. })
        ));
    }

    #[test]
    fn crossing_closes_and_opens_in_one_sample() {
        let mut seg = segmenter();
        let g = gate();

        seg.ingest(&far(0), Some(&g));
        seg.ingest(&center(20_000), Some(&g));
        seg.ingest(&far(30_000), Some(&g));
        let events = seg.ingest(&center(40_000), Some(&g));

        assert_eq!(events.len(), 2);
        assert!(matches!(events.first(), Some(LapEvent::LapCompleted { .. })));
        let Some(LapEvent::LapOpened { start_time_ms, .. }) = events.get(1) else {
            panic!("crossing must immediately open the next lap");
        };
        assert_eq!(*start_time_ms, 40_000, "no timing gap at the line");
    }
}
