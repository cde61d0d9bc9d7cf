use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    CounterMode, DEFAULT_ROLLBACK_ALLOWANCE, DefaultCounterMode, GenerateError, NodeSpec,
    OnRollback, RangeError, RenewContext, SLEEP_DELAY, Scru64Id, SystemClock, TimeSource,
    generator::{Mutex, MutexGuard},
};

/// Rollback allowances of `2^40` ticks (about 8,900 years) or more are
/// rejected as nonsensical.
const MAX_ALLOWANCE_TICKS: u64 = 1 << 40;

struct State<C> {
    prev: Scru64Id,
    counter_mode: C,
    exhausted: bool,
}

/// A lock-based SCRU64 ID generator suitable for multi-threaded environments.
///
/// The generator state (the latest ID and the counter strategy) lives behind
/// an [`Arc<Mutex<_>>`], so clones of a generator share one ID sequence and
/// can be handed to other threads or tasks.
///
/// Each generation method reads the clock, then advances the state in a
/// single critical section:
///
/// - if the clock moved forward by at least one 256-millisecond tick, the
///   counter is renewed through the [`CounterMode`];
/// - if the clock stayed in the same tick or moved back by less than the
///   rollback allowance, the counter of the previous ID is incremented, and
///   an overflowing counter moves the `timestamp` one tick ahead;
/// - otherwise the clock rollback is handled according to [`OnRollback`].
///
/// ## See Also
/// - [`LazyGenerator`] for a generator configured on first use
///
/// [`LazyGenerator`]: crate::LazyGenerator
pub struct Scru64Generator<C = DefaultCounterMode, T = SystemClock>
where
    C: CounterMode,
    T: TimeSource<u64>,
{
    state: Arc<Mutex<State<C>>>,
    node_spec: NodeSpec,
    time: T,
}

impl Scru64Generator {
    /// Creates a generator reading the system clock and renewing its counter
    /// with [`DefaultCounterMode::new(0)`](DefaultCounterMode::new).
    ///
    /// # Example
    /// ```
    /// use scru64::{NodeSpec, Scru64Generator};
    ///
    /// let generator = Scru64Generator::new(NodeSpec::with_node_id(42, 8).unwrap());
    /// let id = generator.generate().unwrap();
    /// assert_eq!(id.node_ctr() >> 16, 42);
    /// ```
    pub fn new(node_spec: NodeSpec) -> Self {
        Self::with_counter_mode(node_spec, DefaultCounterMode::new(0))
    }
}

impl<C> Scru64Generator<C>
where
    C: CounterMode,
{
    /// Creates a generator reading the system clock with a custom counter
    /// strategy.
    pub fn with_counter_mode(node_spec: NodeSpec, counter_mode: C) -> Self {
        Self::with_parts(node_spec, counter_mode, SystemClock)
    }
}

impl<T> Scru64Generator<DefaultCounterMode, T>
where
    T: TimeSource<u64>,
{
    /// Creates a generator with the default counter strategy and a custom
    /// time source.
    pub fn with_time(node_spec: NodeSpec, time: T) -> Self {
        Self::with_parts(node_spec, DefaultCounterMode::new(0), time)
    }
}

impl<C, T> Scru64Generator<C, T>
where
    C: CounterMode,
    T: TimeSource<u64>,
{
    /// Creates a generator from its node spec, counter strategy and time
    /// source.
    ///
    /// If `node_spec` carries a `node_prev`, the generator continues right
    /// after it; otherwise the first call starts a fresh counter.
    pub fn with_parts(node_spec: NodeSpec, counter_mode: C, time: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                prev: node_spec.seed(),
                counter_mode,
                exhausted: false,
            })),
            node_spec,
            time,
        }
    }

    /// Returns the `node_id` of the generator.
    pub const fn node_id(&self) -> u32 {
        self.node_spec.node_id()
    }

    /// Returns the size in bits of the `node_id` adopted by the generator.
    pub const fn node_id_size(&self) -> u8 {
        self.node_spec.node_id_size()
    }

    /// Returns the size in bits of the per-tick counter.
    pub const fn counter_size(&self) -> u8 {
        self.node_spec.counter_size()
    }

    /// Returns a node spec seeded with the latest generated ID.
    ///
    /// Persist its string form before shutting down to let a restarted
    /// generator resume the sequence where this one left off.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::LockPoisoned`] if the lock was poisoned.
    ///
    /// # Example
    /// ```
    /// use scru64::{NodeSpec, Scru64Generator};
    ///
    /// let generator = Scru64Generator::new("42/8".parse().unwrap());
    /// let last = generator.generate().unwrap();
    ///
    /// let saved = generator.node_spec().unwrap().to_string();
    /// let restarted = Scru64Generator::new(saved.parse().unwrap());
    /// assert!(restarted.generate().unwrap() > last);
    /// ```
    pub fn node_spec(&self) -> Result<NodeSpec, GenerateError> {
        let state = self.lock()?;
        Ok(self.node_spec.with_seed(state.prev))
    }

    /// Generates a new SCRU64 ID from the current time, refusing to
    /// generate if the clock has moved back by more than
    /// [`DEFAULT_ROLLBACK_ALLOWANCE`].
    ///
    /// Same as [`Self::generate_or_abort`].
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    pub fn generate(&self) -> Result<Scru64Id, GenerateError> {
        self.generate_or_abort()
    }

    /// Generates a new SCRU64 ID from the current time, or returns
    /// [`GenerateError::ClockRollback`] if the clock has moved back by more
    /// than [`DEFAULT_ROLLBACK_ALLOWANCE`].
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_or_abort(&self) -> Result<Scru64Id, GenerateError> {
        self.generate_or_abort_core(self.time.current_millis(), DEFAULT_ROLLBACK_ALLOWANCE)
    }

    /// Generates a new SCRU64 ID from the current time, resetting the
    /// generator state if the clock has moved back by more than
    /// [`DEFAULT_ROLLBACK_ALLOWANCE`].
    ///
    /// The monotonic order of generated IDs is broken after a reset. Use
    /// only when availability matters more than ordering.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`]. Never returns [`GenerateError::ClockRollback`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_or_reset(&self) -> Result<Scru64Id, GenerateError> {
        self.generate_or_reset_core(self.time.current_millis(), DEFAULT_ROLLBACK_ALLOWANCE)
    }

    /// Generates a new SCRU64 ID from the current time, sleeping the thread
    /// in [`SLEEP_DELAY`] steps while the clock is behind the previous ID.
    ///
    /// The lock is not held while sleeping.
    ///
    /// # Errors
    ///
    /// Only returns fatal errors; see [`GenerateError::is_fatal`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_or_sleep(&self) -> Result<Scru64Id, GenerateError> {
        loop {
            match self.generate_or_abort() {
                Err(GenerateError::ClockRollback) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Clock behind previous ID; sleeping for {SLEEP_DELAY:?}");
                    std::thread::sleep(SLEEP_DELAY);
                }
                result => return result,
            }
        }
    }

    /// Generates a new SCRU64 ID from a given Unix time in milliseconds and
    /// rollback allowance, returning [`GenerateError::ClockRollback`] if the
    /// clock has moved back too far.
    ///
    /// This is the deterministic core of [`Self::generate_or_abort`]; it
    /// does not read the time source.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    ///
    /// # Example
    /// ```
    /// use scru64::{GenerateError, NodeSpec, Scru64Generator};
    ///
    /// let generator = Scru64Generator::new(NodeSpec::with_node_id(1, 8).unwrap());
    /// let ts = 1_577_836_800_000;
    ///
    /// let a = generator.generate_or_abort_core(ts, 10_000).unwrap();
    /// let b = generator.generate_or_abort_core(ts - 5_000, 10_000).unwrap();
    /// assert!(a < b);
    ///
    /// let rollback = generator.generate_or_abort_core(ts - 60_000, 10_000);
    /// assert_eq!(rollback, Err(GenerateError::ClockRollback));
    /// ```
    pub fn generate_or_abort_core(
        &self,
        unix_ts_ms: u64,
        rollback_allowance: u64,
    ) -> Result<Scru64Id, GenerateError> {
        self.advance(unix_ts_ms, rollback_allowance, OnRollback::Abort)
    }

    /// Generates a new SCRU64 ID from a given Unix time in milliseconds and
    /// rollback allowance, resetting the generator state if the clock has
    /// moved back too far.
    ///
    /// This is the deterministic core of [`Self::generate_or_reset`]; it
    /// does not read the time source.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`]. Never returns [`GenerateError::ClockRollback`].
    pub fn generate_or_reset_core(
        &self,
        unix_ts_ms: u64,
        rollback_allowance: u64,
    ) -> Result<Scru64Id, GenerateError> {
        self.advance(unix_ts_ms, rollback_allowance, OnRollback::Reset)
    }

    /// Advances the generator state to a given Unix time in milliseconds and
    /// returns the new ID.
    ///
    /// Both `unix_ts_ms` and `rollback_allowance` are truncated to whole
    /// 256-millisecond ticks.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Range`] if `unix_ts_ms` is less than one tick or
    ///   `rollback_allowance` is `2^40` ticks or more. The state is untouched.
    /// - [`GenerateError::ClockRollback`] if `on_rollback` is
    ///   [`OnRollback::Abort`] and the clock has moved back by
    ///   `rollback_allowance` or more. The state is untouched.
    /// - [`GenerateError::Exhausted`] once the `timestamp` field would exceed
    ///   [`Scru64Id::MAX_TIMESTAMP`]. Every later call fails the same way.
    /// - [`GenerateError::LockPoisoned`] if the lock was poisoned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn advance(
        &self,
        unix_ts_ms: u64,
        rollback_allowance: u64,
        on_rollback: OnRollback,
    ) -> Result<Scru64Id, GenerateError> {
        let timestamp = unix_ts_ms >> 8;
        let allowance = rollback_allowance >> 8;
        if timestamp == 0 {
            return Err(RangeError::ZeroTimestamp.into());
        }
        if allowance >= MAX_ALLOWANCE_TICKS {
            return Err(RangeError::RollbackAllowance {
                allowance: rollback_allowance,
            }
            .into());
        }

        let mut state = self.lock()?;
        if state.exhausted {
            return Err(GenerateError::Exhausted);
        }

        let prev_timestamp = state.prev.timestamp();
        let (next_timestamp, node_ctr) = if timestamp > prev_timestamp {
            (timestamp, self.renew(&mut state.counter_mode, timestamp))
        } else if timestamp + allowance > prev_timestamp {
            // keep the previous timestamp if the new one is not much smaller
            let counter_mask = (1 << self.counter_size()) - 1;
            if (state.prev.node_ctr() & counter_mask) < counter_mask {
                (prev_timestamp, state.prev.node_ctr() + 1)
            } else {
                // counter overflow; borrow one tick from the future
                let next = prev_timestamp + 1;
                (next, self.renew(&mut state.counter_mode, next))
            }
        } else {
            match on_rollback {
                OnRollback::Abort => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        "Clock rollback of {} ticks exceeds allowance; aborting",
                        prev_timestamp - timestamp
                    );
                    return Err(GenerateError::ClockRollback);
                }
                OnRollback::Reset => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        "Clock rollback of {} ticks exceeds allowance; resetting state",
                        prev_timestamp - timestamp
                    );
                    (timestamp, self.renew(&mut state.counter_mode, timestamp))
                }
            }
        };

        match Scru64Id::from_parts(next_timestamp, node_ctr) {
            Ok(id) => {
                state.prev = id;
                Ok(id)
            }
            Err(_) => Self::cold_exhausted(&mut state),
        }
    }

    /// Returns `node_id << counter_size | counter` with a fresh counter.
    fn renew(&self, counter_mode: &mut C, timestamp: u64) -> u32 {
        let counter_size = self.counter_size();
        let counter_mask = (1_u32 << counter_size) - 1;
        let context = RenewContext::new(timestamp, self.node_id());
        let counter = counter_mode.renew(counter_size, &context);
        debug_assert!(
            counter <= counter_mask,
            "`CounterMode::renew` returned {counter}, larger than {counter_size} bits"
        );
        (self.node_id() << counter_size) | (counter & counter_mask)
    }

    #[cold]
    #[inline(never)]
    fn cold_exhausted(state: &mut State<C>) -> Result<Scru64Id, GenerateError> {
        state.exhausted = true;
        #[cfg(feature = "tracing")]
        tracing::error!("`timestamp` field exhausted; generator permanently disabled");
        Err(GenerateError::Exhausted)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State<C>>, GenerateError> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}

impl<C, T> Clone for Scru64Generator<C, T>
where
    C: CounterMode,
    T: TimeSource<u64> + Clone,
{
    /// Returns a handle to the same ID sequence.
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            node_spec: self.node_spec,
            time: self.time.clone(),
        }
    }
}

impl<C, T> core::fmt::Debug for Scru64Generator<C, T>
where
    C: CounterMode,
    T: TimeSource<u64>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scru64Generator")
            .field("node_id", &self.node_id())
            .field("node_id_size", &self.node_id_size())
            .finish_non_exhaustive()
    }
}
