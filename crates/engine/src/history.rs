//! Completed-lap storage and best-lap tracking.

use openlap_schemas::{LapHistorySnapshot, LapRecord};

/// Ordered store of completed laps.
///
/// Insertion order is lap-number order for engine-produced records. The
/// best-lap index is recomputed on every mutation by scanning for the
/// minimum elapsed time with a strict comparison, so ties keep the lap
/// that was set first. Records without timing data (possible only via
/// [`restore`]) stay in the list but never win the best slot.
///
/// [`restore`]: LapHistory::restore
#[derive(Debug, Clone, Default)]
pub struct LapHistory {
    laps: Vec<LapRecord>,
    best_index: Option<usize>,
}

impl LapHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed lap and recomputes the best index.
    ///
    /// Returns `true` when the appended lap took over the best slot.
    pub fn append(&mut self, record: LapRecord) -> bool {
        self.laps.push(record);
        self.recompute_best();
        let appended_index = self.laps.len().saturating_sub(1);
        self.best_index == Some(appended_index)
    }

    /// Wipes all laps and the best pointer.
    pub fn clear(&mut self) {
        self.laps.clear();
        self.best_index = None;
    }

    /// Replaces the history wholesale with externally supplied records.
    ///
    /// Malformed records (missing elapsed time) are retained for display
    /// but skipped when recomputing the best lap.
    pub fn restore(&mut self, laps: Vec<LapRecord>) {
        self.laps = laps;
        self.recompute_best();
    }

    /// Completed laps in completion order.
    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    /// The fastest complete lap, if any lap has finished.
    pub fn best_lap(&self) -> Option<&LapRecord> {
        self.best_index.and_then(|i| self.laps.get(i))
    }

    /// Index of the fastest complete lap.
    pub fn best_lap_index(&self) -> Option<usize> {
        self.best_index
    }

    /// Number of stored laps.
    pub fn len(&self) -> usize {
        self.laps.len()
    }

    /// Whether the history holds no laps.
    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Pure-data copy of the history for serialization.
    pub fn export_snapshot(&self) -> LapHistorySnapshot {
        LapHistorySnapshot {
            laps: self.laps.clone(),
            best_lap_index: self.best_index,
        }
    }

    fn recompute_best(&mut self) {
        let mut best: Option<(usize, u64)> = None;
        for (index, record) in self.laps.iter().enumerate() {
            let Some(elapsed_ms) = record.elapsed_ms else {
                continue;
            };
            let is_better = best.is_none_or(|(_, best_ms)| elapsed_ms < best_ms);
            if is_better {
                best = Some((index, elapsed_ms));
            }
        }
        self.best_index = best.map(|(index, _)| index);
    }
}
