//! Fuzzes the lap engine's ingest loop with a synthesized fix stream.
//!
//! Each 10-byte chunk becomes one sample: a time step, a control byte, and
//! two f32 coordinate offsets. Offsets are folded to stay near the gate so
//! crossings, debounce, and the stationary filter all fire, while NaN and
//! infinity still reach the validator. The engine must never panic and the
//! completed-lap sequence must stay strictly ordered.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_engine_ingest
#![no_main]

use libfuzzer_sys::fuzz_target;
use openlap_config::LapConfig;
use openlap_engine::LapTimer;
use openlap_geo::{GeoPoint, Geofence};
use openlap_schemas::TelemetrySample;

const GATE_LAT: f64 = 40.7448;
const GATE_LON: f64 = -74.0270;

fuzz_target!(|data: &[u8]| {
    let mut timer = LapTimer::new(LapConfig {
        geofence: Some(Geofence::new(GeoPoint::new(GATE_LAT, GATE_LON), 15.0)),
        min_lap_duration_ms: 500,
        ..LapConfig::default()
    });

    let mut timestamp_ms: u64 = 0;
    for chunk in data.chunks_exact(10) {
        let Some((&step, rest)) = chunk.split_first() else {
            return;
        };
        let Some((&control, rest)) = rest.split_first() else {
            return;
        };
        let Some((lat_bits, rest)) = rest.split_first_chunk::<4>() else {
            return;
        };
        let Some((lon_bits, _)) = rest.split_first_chunk::<4>() else {
            return;
        };

        match control {
            0 => {
                let radius_m = f64::from(step) * 0.25;
                let _ = timer.set_geofence(Geofence::new(
                    GeoPoint::new(GATE_LAT, GATE_LON),
                    radius_m,
                ));
            }
            255 => timer.reset(),
            _ => {}
        }

        // Fold finite offsets into a ~100 m band around the gate; NaN and
        // infinity fall through to the validator untouched.
        let lat = GATE_LAT + f64::from(f32::from_le_bytes(*lat_bits)) % 0.001;
        let lon = GATE_LON + f64::from(f32::from_le_bytes(*lon_bits)) % 0.001;

        timestamp_ms = timestamp_ms.saturating_add(u64::from(step).saturating_mul(100));
        timer.ingest(&TelemetrySample::new(timestamp_ms, lat, lon));

        if let Some(snapshot) = timer.current_lap_snapshot() {
            assert!(snapshot.distance_m >= 0.0);
        }
    }

    for pair in timer.laps().windows(2) {
        let [earlier, later] = pair else { continue };
        assert!(earlier.lap_number < later.lap_number);
    }
});
