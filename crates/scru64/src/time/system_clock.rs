#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// The system wall clock.
///
/// Unlike a monotonic clock, the wall clock may be adjusted backwards; the
/// generator's rollback allowance absorbs small adjustments. A clock set
/// before 1970 reads as `0`, which the generator rejects as an invalid
/// timestamp rather than emitting a bogus ID.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource<u64> for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}
