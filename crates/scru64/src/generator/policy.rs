use core::time::Duration;

/// The rollback allowance used by the clock-sampling generation methods, in
/// milliseconds.
///
/// A clock that moves back by less than this is treated as not having moved
/// at all, and the generator keeps incrementing the counter of the last
/// timestamp.
pub const DEFAULT_ROLLBACK_ALLOWANCE: u64 = 10_000; // 10 seconds

/// How long [`generate_or_sleep`] waits between attempts after a clock
/// rollback. A quarter of the 256-millisecond `timestamp` tick.
///
/// [`generate_or_sleep`]: crate::Scru64Generator::generate_or_sleep
pub const SLEEP_DELAY: Duration = Duration::from_millis(64);

/// What to do when the clock has moved back further than the rollback
/// allowance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OnRollback {
    /// Refuse to generate and return [`GenerateError::ClockRollback`],
    /// leaving the generator state untouched.
    ///
    /// [`GenerateError::ClockRollback`]: crate::GenerateError::ClockRollback
    Abort,
    /// Reset the generator state to the current timestamp. The returned ID
    /// sorts before the previous one, which breaks monotonicity.
    Reset,
}
