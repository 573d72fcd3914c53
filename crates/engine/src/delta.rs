//! Live delta projection against the best lap.
//!
//! The projector answers one question: at the distance the car has covered
//! on the current lap, how far ahead or behind the best lap is it? That is
//! a pace comparison at the same point on track, which is meaningful
//! mid-lap, unlike comparing raw elapsed times, which only lines up at the
//! finish line.

use openlap_schemas::LapRecord;

/// Projects the current lap's position onto the best lap's polyline.
///
/// Returns `None` when there is no usable best lap. Otherwise the result
/// is current elapsed minus the time the best lap needed to reach the same
/// distance: negative means the car is ahead of the best lap.
///
/// Distances at or beyond the best lap's total fall back to a plain
/// total-time comparison, as does a polyline too short to interpolate.
pub fn project(
    best: Option<&LapRecord>,
    current_distance_m: f64,
    current_elapsed_ms: u64,
) -> Option<i64> {
    let best = best?;
    let best_elapsed_ms = best.elapsed_ms?;

    let current = i64::try_from(current_elapsed_ms).unwrap_or(i64::MAX);
    let best_total = i64::try_from(best_elapsed_ms).unwrap_or(i64::MAX);

    if best.checkpoints.len() < 2 || current_distance_m >= best.distance_m {
        return Some(current.saturating_sub(best_total));
    }

    let mut prev = best.checkpoints.first().copied()?;
    for curr in best.checkpoints.iter().skip(1) {
        if current_distance_m <= curr.distance_m {
            let span_m = curr.distance_m - prev.distance_m;
            let projected_ms = if span_m <= 0.0 {
                // Vertical segment: the best lap gained no distance here,
                // so the earlier vertex is the defined answer.
                prev.elapsed_ms as f64
            } else {
                let fraction = (current_distance_m - prev.distance_m) / span_m;
                prev.elapsed_ms as f64
                    + (curr.elapsed_ms as f64 - prev.elapsed_ms as f64) * fraction
            };
            return Some(current.saturating_sub(projected_ms.round() as i64));
        }
        prev = *curr;
    }

    // The terminal checkpoint equals the record's total distance, so the
    // scan cannot fall through for distances below it; keep the total-time
    // fallback anyway for polylines that violate that shape.
    Some(current.saturating_sub(best_total))
}
