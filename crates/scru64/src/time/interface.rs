/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. SCRU64 timestamps are derived by dropping the lowest
/// eight bits of the returned value, so implementations do not need more than
/// millisecond resolution.
///
/// # Example
///
/// ```
/// use scru64::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_577_836_800_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis() >> 8, 6_163_425_000);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

impl<T, S> TimeSource<T> for &S
where
    S: TimeSource<T> + ?Sized,
{
    fn current_millis(&self) -> T {
        (**self).current_millis()
    }
}
