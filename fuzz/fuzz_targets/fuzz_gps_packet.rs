//! Fuzzes the wire packet decoder.
//!
//! Exercises `GpsPacket::from_json_bytes` and `to_sample` against arbitrary
//! byte input. The listener feeds raw datagrams straight into this path, so
//! errors are expected and panics are not.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_gps_packet
#![no_main]

use libfuzzer_sys::fuzz_target;
use openlap_schemas::GpsPacket;

fuzz_target!(|data: &[u8]| {
    if let Ok(packet) = GpsPacket::from_json_bytes(data) {
        let _ = packet.to_sample();
    }
});
