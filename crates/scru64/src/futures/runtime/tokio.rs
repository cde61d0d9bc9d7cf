use core::{future::Future, time::Duration};

use crate::{
    CounterMode, GenerateError, Scru64Generator, Scru64GeneratorAsyncExt, Scru64Id, SleepProvider,
    TimeSource,
};

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider for use in async applications built on Tokio.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// An implementation of [`SleepProvider`] using Tokio's yield.
///
/// This strategy avoids timer-based delays by yielding to the scheduler
/// immediately. A clock rollback can last for seconds, so the task keeps
/// polling the generator until the clock catches up; prefer [`TokioSleep`]
/// unless rollbacks are known to be brief.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioYield;
impl SleepProvider for TokioYield {
    async fn sleep_for(_dur: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Extension trait for generating SCRU64 IDs on the
/// [`tokio`](https://docs.rs/tokio) runtime.
///
/// Uses [`TokioSleep`] so that callers do not need to name a sleep provider.
pub trait Scru64GeneratorAsyncTokioExt {
    /// Returns a future that resolves to a new SCRU64 ID, sleeping with
    /// [`TokioSleep`] while the clock is behind the previous ID.
    ///
    /// # Errors
    ///
    /// Only resolves to fatal errors; see [`GenerateError::is_fatal`].
    fn generate_async(&self) -> impl Future<Output = Result<Scru64Id, GenerateError>>;
}

impl<C, T> Scru64GeneratorAsyncTokioExt for Scru64Generator<C, T>
where
    C: CounterMode,
    T: TimeSource<u64>,
{
    fn generate_async(&self) -> impl Future<Output = Result<Scru64Id, GenerateError>> {
        self.generate_or_await::<TokioSleep>()
    }
}
