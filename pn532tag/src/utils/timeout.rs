//! Timeout helpers used across the crate.

use std::time::Duration;

/// Default response timeout in milliseconds used when a caller doesn't
/// provide an explicit one.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Timeout used while waiting for the chip to acknowledge a command frame.
pub const DEFAULT_ACK_TIMEOUT_MS: u64 = 5000;

/// Timeout used when waiting for the next initiator command. The call
/// blocks until a reader talks to the emulated tag.
pub const INITIATOR_TIMEOUT_MS: u64 = 3000;

/// Interval between two status polls.
pub const POLL_INTERVAL_MS: u64 = 10;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Number of status polls that fit in `timeout_ms`. `None` means the
/// caller asked to wait without bound (timeout 0).
pub fn poll_budget(timeout_ms: u64, interval_ms: u64) -> Option<u64> {
    if timeout_ms == 0 {
        return None;
    }
    Some(timeout_ms / interval_ms.max(1))
}
