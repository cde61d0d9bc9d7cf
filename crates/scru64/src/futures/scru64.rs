use core::future::Future;

use crate::{
    CounterMode, GenerateError, SLEEP_DELAY, Scru64Generator, Scru64Id, SleepProvider, TimeSource,
};

/// Extension trait for generating SCRU64 IDs without blocking the thread.
///
/// This is the async counterpart of
/// [`Scru64Generator::generate_or_sleep`]: when the clock is behind the
/// previous ID, the task is suspended through a [`SleepProvider`] instead of
/// putting the whole thread to sleep.
pub trait Scru64GeneratorAsyncExt {
    /// Returns a future that resolves to a new SCRU64 ID, sleeping in
    /// [`SLEEP_DELAY`] steps while the clock is behind the previous ID.
    ///
    /// The generator lock is never held across an `.await`.
    ///
    /// # Errors
    ///
    /// Only resolves to fatal errors; see [`GenerateError::is_fatal`].
    fn generate_or_await<S>(&self) -> impl Future<Output = Result<Scru64Id, GenerateError>>
    where
        S: SleepProvider;
}

impl<C, T> Scru64GeneratorAsyncExt for Scru64Generator<C, T>
where
    C: CounterMode,
    T: TimeSource<u64>,
{
    fn generate_or_await<S>(&self) -> impl Future<Output = Result<Scru64Id, GenerateError>>
    where
        S: SleepProvider,
    {
        async {
            loop {
                match self.generate_or_abort() {
                    Err(GenerateError::ClockRollback) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!("Clock behind previous ID; awaiting {SLEEP_DELAY:?}");
                    }
                    result => return result,
                }
                S::sleep_for(SLEEP_DELAY).await;
            }
        }
    }
}
