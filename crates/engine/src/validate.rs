//! Streaming sample validation.

use openlap_errors::SampleError;
use openlap_schemas::TelemetrySample;

/// Stateful gatekeeper in front of the segmenter.
///
/// Coordinate checks are stateless, but timestamp ordering needs a
/// watermark: the engine promises downstream code that accepted samples
/// arrive in non-decreasing timestamp order, so a sample older than the
/// last accepted one is rejected rather than clamped. Equal timestamps
/// pass, because consumer GPS units happily emit duplicate fixes.
#[derive(Debug, Clone, Default)]
pub struct SampleValidator {
    last_timestamp_ms: Option<u64>,
}

impl SampleValidator {
    /// Creates a validator with no watermark.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates one sample and, on success, advances the watermark.
    ///
    /// Rejected samples leave the watermark untouched, so one bad fix
    /// cannot block the stream that follows it.
    ///
    /// # Errors
    ///
    /// Returns the coordinate failure or timestamp regression that caused
    /// the sample to be dropped.
    pub fn check(&mut self, sample: &TelemetrySample) -> Result<(), SampleError> {
        sample.validate_coordinates()?;
        if let Some(previous_ms) = self.last_timestamp_ms
            && sample.timestamp_ms < previous_ms
        {
            return Err(SampleError::TimestampRegression {
                timestamp_ms: sample.timestamp_ms,
                previous_ms,
            });
        }
        self.last_timestamp_ms = Some(sample.timestamp_ms);
        Ok(())
    }

    /// Clears the watermark, allowing the next sample to carry any time.
    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }
}
