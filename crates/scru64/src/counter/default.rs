use crate::{CounterMode, RandSource, RenewContext, ThreadRandom};

/// The default "initialize a portion counter" strategy.
///
/// The counter is reset to a random number for each new `timestamp` tick, but
/// the `overflow_guard_size` leading bits of the counter are set to zero to
/// reserve room before the counter overflows into the next tick.
///
/// The random numbers are not required to be cryptographically strong; a
/// counter of at most 23 bits is guessable anyway.
///
/// # Example
/// ```
/// use scru64::{CounterMode, DefaultCounterMode, RenewContext};
///
/// let mut mode = DefaultCounterMode::new(4);
/// let counter = mode.renew(16, &RenewContext::new(1, 0));
/// assert!(counter < 1 << 12);
/// ```
#[derive(Clone, Debug)]
pub struct DefaultCounterMode<R = ThreadRandom>
where
    R: RandSource<u32>,
{
    overflow_guard_size: u8,
    rng: R,
}

impl DefaultCounterMode {
    /// Creates a counter mode with `overflow_guard_size` leading zero bits,
    /// backed by the thread-local RNG.
    pub const fn new(overflow_guard_size: u8) -> Self {
        Self::with_rng(overflow_guard_size, ThreadRandom)
    }
}

impl<R> DefaultCounterMode<R>
where
    R: RandSource<u32>,
{
    /// Creates a counter mode drawing from a custom [`RandSource`].
    pub const fn with_rng(overflow_guard_size: u8, rng: R) -> Self {
        Self {
            overflow_guard_size,
            rng,
        }
    }

    /// Returns the number of reserved leading zero bits.
    pub const fn overflow_guard_size(&self) -> u8 {
        self.overflow_guard_size
    }
}

impl<R> CounterMode for DefaultCounterMode<R>
where
    R: RandSource<u32>,
{
    fn renew(&mut self, counter_size: u8, _context: &RenewContext) -> u32 {
        if self.overflow_guard_size < counter_size {
            let shift = 32 + u32::from(self.overflow_guard_size) - u32::from(counter_size);
            self.rng.rand() >> shift
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NODE_CTR_SIZE;

    struct FixedRand(u32);

    impl RandSource<u32> for FixedRand {
        fn rand(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn keeps_top_bits_of_random_number() {
        let ctx = RenewContext::new(0x0123_4567_89ab, 0);

        let mut mode = DefaultCounterMode::with_rng(0, FixedRand(u32::MAX));
        assert_eq!(mode.renew(16, &ctx), 0xffff);
        assert_eq!(mode.renew(1, &ctx), 1);

        let mut mode = DefaultCounterMode::with_rng(4, FixedRand(u32::MAX));
        assert_eq!(mode.renew(16, &ctx), 0x0fff);
        assert_eq!(mode.renew(5, &ctx), 1);

        let mut mode = DefaultCounterMode::with_rng(8, FixedRand(0xabcd_0000));
        assert_eq!(mode.renew(16, &ctx), 0xab);
    }

    #[test]
    fn guard_covering_the_whole_counter_yields_zero() {
        let ctx = RenewContext::new(1, 0);
        let mut mode = DefaultCounterMode::with_rng(16, FixedRand(u32::MAX));
        assert_eq!(mode.renew(16, &ctx), 0);
        assert_eq!(mode.renew(8, &ctx), 0);
        assert_eq!(mode.overflow_guard_size(), 16);
    }

    // Statistical test against the thread RNG; may fail at a very low
    // probability.
    #[test]
    fn sets_leading_guard_bits_to_zero() {
        const N: u32 = 4096;

        // binomial distribution, 99.999999% confidence interval
        let margin = 5.730_729 * (0.5 * 0.5 / f64::from(N)).sqrt();

        let ctx = RenewContext::new(0x0123_4567_89ab, 0);
        for counter_size in 1..NODE_CTR_SIZE {
            for overflow_guard_size in 0..NODE_CTR_SIZE {
                // number of set bits by bit position (from LSB to MSB)
                let mut counts_by_pos = [0_u32; NODE_CTR_SIZE as usize];

                let mut mode = DefaultCounterMode::new(overflow_guard_size);
                for _ in 0..N {
                    let mut n = mode.renew(counter_size, &ctx);
                    for e in &mut counts_by_pos {
                        *e += n & 1;
                        n >>= 1;
                    }
                    assert_eq!(n, 0);
                }

                let filled = counter_size.saturating_sub(overflow_guard_size) as usize;
                for &e in &counts_by_pos[..filled] {
                    assert!((f64::from(e) / f64::from(N) - 0.5).abs() < margin);
                }
                for &e in &counts_by_pos[filled..] {
                    assert_eq!(e, 0);
                }
            }
        }
    }
}
