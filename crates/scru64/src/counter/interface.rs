/// Context handed by the generator to [`CounterMode::renew`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct RenewContext {
    /// The `timestamp` value the new counter belongs to.
    pub timestamp: u64,

    /// The `node_id` of the generator.
    pub node_id: u32,
}

impl RenewContext {
    /// Creates a context for the given tick and node.
    pub const fn new(timestamp: u64, node_id: u32) -> Self {
        Self { timestamp, node_id }
    }
}

/// A strategy that picks the initial counter value for each new `timestamp`.
///
/// [`Scru64Generator`] calls [`renew`] when the `timestamp` field has changed
/// since the immediately preceding ID, from inside its critical section. The
/// returned value must fit in `counter_size` bits; the generator masks off
/// anything above that.
///
/// [`Scru64Generator`]: crate::Scru64Generator
/// [`renew`]: CounterMode::renew
pub trait CounterMode {
    /// Returns the next initial counter value of `counter_size` bits.
    ///
    /// `counter_size` ranges from 1 to 23.
    fn renew(&mut self, counter_size: u8, context: &RenewContext) -> u32;
}

impl<C> CounterMode for Box<C>
where
    C: CounterMode + ?Sized,
{
    fn renew(&mut self, counter_size: u8, context: &RenewContext) -> u32 {
        (**self).renew(counter_size, context)
    }
}

/// A counter mode that always starts a new tick at zero.
///
/// This maximizes the number of IDs per tick before the generator has to
/// borrow from the next tick, at the cost of making same-tick IDs of
/// different nodes look alike in their low bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroCounterMode;

impl CounterMode for ZeroCounterMode {
    fn renew(&mut self, _counter_size: u8, _context: &RenewContext) -> u32 {
        0
    }
}

/// A counter mode backed by a closure.
///
/// Created with [`counter_mode_fn`].
#[derive(Clone, Copy)]
pub struct FnCounterMode<F>(F);

impl<F> core::fmt::Debug for FnCounterMode<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnCounterMode").finish_non_exhaustive()
    }
}

impl<F> CounterMode for FnCounterMode<F>
where
    F: FnMut(u8, &RenewContext) -> u32,
{
    fn renew(&mut self, counter_size: u8, context: &RenewContext) -> u32 {
        (self.0)(counter_size, context)
    }
}

/// Wraps a closure into a [`CounterMode`], e.g. to feed counters from an
/// external sequence.
///
/// ```
/// use scru64::{CounterMode, RenewContext, counter_mode_fn};
///
/// let mut next = 0;
/// let mut mode = counter_mode_fn(move |counter_size: u8, _: &RenewContext| {
///     next = (next + 1) % (1 << counter_size);
///     next
/// });
/// let ctx = RenewContext::new(1, 0);
/// assert_eq!(mode.renew(8, &ctx), 1);
/// assert_eq!(mode.renew(8, &ctx), 2);
/// ```
pub const fn counter_mode_fn<F>(f: F) -> FnCounterMode<F>
where
    F: FnMut(u8, &RenewContext) -> u32,
{
    FnCounterMode(f)
}
