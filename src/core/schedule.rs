//! Tick scheduling

use chrono::Timelike;
use std::time::Duration;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Time to sleep after a tick that started at `now`.
///
/// Lines are aligned to wall-clock second boundaries: the wait runs to the end
/// of the current second plus `interval - 1` whole seconds. Without a readable
/// clock the full interval is used.
pub fn duration_until_next_tick<T: Timelike>(now: Option<&T>, interval: u64) -> Duration {
    let interval = interval.max(1);
    // Leap seconds report nanosecond() >= 1e9
    let elapsed = now
        .map(|now| now.nanosecond().min(NANOS_PER_SEC - 1))
        .unwrap_or(0);

    Duration::from_secs(interval - 1) + Duration::from_nanos(u64::from(NANOS_PER_SEC - elapsed))
}
