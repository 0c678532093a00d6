//! Time management: turn the remaining game time into a per-move slice.

use std::time::Duration;

use crate::config::EngineConfig;

/// Time one move may spend before the search aborts.
///
/// `remaining * move_time_fraction`, capped at `max_move_time`, never below
/// one millisecond.
pub fn move_time_slice(remaining: Duration, config: &EngineConfig) -> Duration {
    let remaining_ms = remaining.as_millis() as f64;
    let cap_ms = config.max_move_time.as_millis() as f64;
    let slice_ms = (remaining_ms * config.move_time_fraction).min(cap_ms).max(1.0);
    Duration::from_millis(slice_ms as u64)
}
