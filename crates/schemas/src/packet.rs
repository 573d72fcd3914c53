//! Raw GPS wire packets.
//!
//! The transmitter sends one JSON object per fix. Every field is nullable on
//! the wire because the sender forwards whatever its NMEA parse produced,
//! including partial sentences. Decoding into a [`TelemetrySample`] is where
//! the required-field and finiteness rules are applied.
//!
//! A complete packet looks like:
//!
//! ```json
//! {
//!   "ts": "2026-08-22T14:03:07Z",
//!   "lat": 40.744782, "lon": -74.027, "alt": 26.0,
//!   "fix": 1, "sats": 9, "hdop": 0.8,
//!   "imu": {"accel": [0.01, -0.02, -9.79], "gyro": [0.001, 0.0, -0.002]}
//! }
//! ```

use chrono::DateTime;
use openlap_errors::PacketError;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetrySample;

/// Inertial readings bundled with a GPS fix.
///
/// Axis order is x, y, z in the sensor frame. Acceleration is in m/s^2
/// (gravity included), angular rate in rad/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImuReading {
    /// Accelerometer reading in m/s^2.
    pub accel: [f64; 3],
    /// Gyroscope reading in rad/s.
    pub gyro: [f64; 3],
}

/// One GPS packet exactly as it appears on the wire.
///
/// Field names match the transmitter's JSON keys. Unknown keys are ignored
/// so firmware can add fields without breaking older receivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsPacket {
    /// Fix time as an RFC 3339 string, UTC.
    #[serde(default)]
    pub ts: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default)]
    pub lon: Option<f64>,
    /// Altitude above mean sea level in meters.
    #[serde(default)]
    pub alt: Option<f64>,
    /// GNSS fix quality indicator.
    #[serde(default)]
    pub fix: Option<u8>,
    /// Satellites used for the fix.
    #[serde(default)]
    pub sats: Option<u8>,
    /// Horizontal dilution of precision.
    #[serde(default)]
    pub hdop: Option<f64>,
    /// Inertial readings, present only on IMU-equipped senders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imu: Option<ImuReading>,
}

impl GpsPacket {
    /// Parses a packet from a raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::Json`] when the bytes are not valid JSON for
    /// this schema. Null or missing fields are not an error at this stage.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, PacketError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Converts the packet into a validated telemetry sample.
    ///
    /// The timestamp string is parsed as RFC 3339 and converted to Unix
    /// milliseconds. The altitude, fix, satellite, and HDOP fields carry
    /// over as optional metadata.
    ///
    /// # Errors
    ///
    /// Fails when the timestamp is missing, unparseable, or before the Unix
    /// epoch, when either coordinate is missing, or when a coordinate is
    /// NaN or infinite.
    pub fn to_sample(&self) -> Result<TelemetrySample, PacketError> {
        let Some(raw_ts) = self.ts.as_deref() else {
            return Err(PacketError::MissingTimestamp);
        };
        let Ok(parsed) = DateTime::parse_from_rfc3339(raw_ts) else {
            return Err(PacketError::InvalidTimestamp(raw_ts.to_string()));
        };
        let Ok(timestamp_ms) = u64::try_from(parsed.timestamp_millis()) else {
            return Err(PacketError::InvalidTimestamp(raw_ts.to_string()));
        };

        let (Some(lat_deg), Some(lon_deg)) = (self.lat, self.lon) else {
            return Err(PacketError::MissingCoordinates);
        };
        if !lat_deg.is_finite() || !lon_deg.is_finite() {
            return Err(PacketError::NonFiniteCoordinate);
        }

        Ok(TelemetrySample {
            timestamp_ms,
            lat_deg,
            lon_deg,
            altitude_m: self.alt,
            fix_quality: self.fix,
            satellites: self.sats,
            hdop: self.hdop,
        })
    }
}
