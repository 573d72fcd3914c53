//! Validated telemetry samples.
//!
//! A [`TelemetrySample`] is what the engine ingests: a position fix with a
//! Unix-millisecond timestamp, decoded from the wire and carrying whatever
//! quality metadata the receiver reported. Coordinate validation lives here;
//! timestamp ordering is session state and is enforced by the engine.

use openlap_errors::SampleError;
use openlap_geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A single decoded GPS telemetry sample.
///
/// # Field Groups
/// - **Position**: timestamp_ms, lat_deg, lon_deg
/// - **Quality**: altitude_m, fix_quality, satellites, hdop
///
/// # Example
/// ```
/// use openlap_schemas::telemetry::TelemetrySample;
///
/// let sample = TelemetrySample::new(1_700_000_000_000, 40.744782, -74.027)
///     .with_altitude_m(26.0)
///     .with_satellites(9);
///
/// assert!(sample.validate_coordinates().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    // === Position ===
    /// Sample time in Unix milliseconds.
    pub timestamp_ms: u64,

    /// Latitude in decimal degrees, positive north.
    pub lat_deg: f64,

    /// Longitude in decimal degrees, positive east.
    pub lon_deg: f64,

    // === Receiver quality ===
    /// Altitude above mean sea level in meters, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,

    /// GNSS fix quality (0 = none, 1 = GPS, 2 = differential), if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_quality: Option<u8>,

    /// Number of satellites used for the fix, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellites: Option<u8>,

    /// Horizontal dilution of precision, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdop: Option<f64>,
}

impl TelemetrySample {
    /// Creates a sample with only the required position fields.
    pub const fn new(timestamp_ms: u64, lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            timestamp_ms,
            lat_deg,
            lon_deg,
            altitude_m: None,
            fix_quality: None,
            satellites: None,
            hdop: None,
        }
    }

    /// Sets the reported altitude.
    #[must_use]
    pub const fn with_altitude_m(mut self, altitude_m: f64) -> Self {
        self.altitude_m = Some(altitude_m);
        self
    }

    /// Sets the reported fix quality.
    #[must_use]
    pub const fn with_fix_quality(mut self, fix_quality: u8) -> Self {
        self.fix_quality = Some(fix_quality);
        self
    }

    /// Sets the reported satellite count.
    #[must_use]
    pub const fn with_satellites(mut self, satellites: u8) -> Self {
        self.satellites = Some(satellites);
        self
    }

    /// Sets the reported horizontal dilution of precision.
    #[must_use]
    pub const fn with_hdop(mut self, hdop: f64) -> Self {
        self.hdop = Some(hdop);
        self
    }

    /// The sample's position as a geometry point.
    pub const fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat_deg, self.lon_deg)
    }

    /// Checks that both coordinates are finite and within WGS-84 range.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: non-finite values before range
    /// violations, latitude before longitude.
    pub fn validate_coordinates(&self) -> Result<(), SampleError> {
        if !self.lat_deg.is_finite() || !self.lon_deg.is_finite() {
            return Err(SampleError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&self.lat_deg) {
            return Err(SampleError::LatitudeOutOfRange {
                value: self.lat_deg,
            });
        }
        if !(-180.0..=180.0).contains(&self.lon_deg) {
            return Err(SampleError::LongitudeOutOfRange {
                value: self.lon_deg,
            });
        }
        Ok(())
    }
}
