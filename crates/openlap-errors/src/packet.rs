//! Wire packet decode error types.
//!
//! These errors describe why raw bytes from a GPS transmitter could not be
//! turned into a telemetry sample. Unlike [`crate::SampleError`] they wrap
//! library errors and are not serializable; a decode failure ends at the
//! ingest boundary instead of traveling through the engine.

/// Packet decode error types.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// The payload was not valid JSON for the packet schema
    #[error("malformed packet JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The timestamp field was present but not a usable time
    #[error("timestamp {0:?} is not a valid RFC 3339 time")]
    InvalidTimestamp(String),

    /// The packet carried no timestamp at all
    #[error("packet has no timestamp")]
    MissingTimestamp,

    /// The packet carried no position fix
    #[error("packet has no latitude/longitude fix")]
    MissingCoordinates,

    /// Latitude or longitude was NaN or infinite
    #[error("packet coordinates are not finite numbers")]
    NonFiniteCoordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_wrap_with_context() {
        let Err(parse_err) = serde_json::from_str::<serde_json::Value>("{not json") else {
            panic!("expected a parse failure");
        };
        let err = PacketError::from(parse_err);
        assert!(err.to_string().starts_with("malformed packet JSON:"));
    }

    #[test]
    fn invalid_timestamp_reports_the_raw_text() {
        let err = PacketError::InvalidTimestamp("2026-13-99T99:99:99Z".to_string());
        assert!(err.to_string().contains("2026-13-99T99:99:99Z"));
    }
}
