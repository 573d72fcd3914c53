//! Fuzzes lap history restoration from untrusted snapshot files.
//!
//! `laps import` deserializes user-supplied JSON and feeds the records
//! through `LapTimer::restore`, which must recompute the best lap and the
//! next lap number without panicking on any record shape.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_history_restore
#![no_main]

use libfuzzer_sys::fuzz_target;
use openlap_config::LapConfig;
use openlap_engine::LapTimer;
use openlap_schemas::LapHistorySnapshot;

fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = serde_json::from_slice::<LapHistorySnapshot>(data) else {
        return;
    };

    let mut timer = LapTimer::new(LapConfig::default());
    timer.restore(snapshot.laps);

    // Restored state must stay internally consistent.
    let exported = timer.export_snapshot();
    if let Some(index) = exported.best_lap_index {
        assert!(index < exported.laps.len());
    }
});
