use std::time::Instant;

/// Signed nanosecond distance from `earlier` to `later`.
///
/// Negative when `later` precedes `earlier`. Saturates at the `i64` bounds.
pub fn signed_nanos_between(earlier: Instant, later: Instant) -> i64 {
    match later.checked_duration_since(earlier) {
        Some(forward) => i64::try_from(forward.as_nanos()).unwrap_or(i64::MAX),
        None => {
            let backward = earlier.saturating_duration_since(later).as_nanos();
            i64::try_from(backward).map_or(i64::MIN, |nanos| -nanos)
        }
    }
}
