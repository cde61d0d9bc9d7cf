use core::{future::Future, time::Duration};

use smol::Timer;

use crate::{
    CounterMode, GenerateError, Scru64Generator, Scru64GeneratorAsyncExt, Scru64Id, SleepProvider,
    TimeSource,
};

/// An implementation of [`SleepProvider`] using Smol's timer.
///
/// This is the default provider for use in async applications built on Smol.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmolSleep;
impl SleepProvider for SmolSleep {
    async fn sleep_for(dur: Duration) {
        Timer::after(dur).await;
    }
}

/// An implementation of [`SleepProvider`] using Smol's yield.
///
/// Like [`TokioYield`](crate::TokioYield) when the `async-tokio` feature is
/// enabled, this keeps polling the generator until the clock catches up.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmolYield;
impl SleepProvider for SmolYield {
    async fn sleep_for(_dur: Duration) {
        smol::future::yield_now().await;
    }
}

/// Extension trait for generating SCRU64 IDs on the
/// [`smol`](https://docs.rs/smol) runtime.
///
/// Uses [`SmolSleep`] so that callers do not need to name a sleep provider.
pub trait Scru64GeneratorAsyncSmolExt {
    /// Returns a future that resolves to a new SCRU64 ID, sleeping with
    /// [`SmolSleep`] while the clock is behind the previous ID.
    ///
    /// # Errors
    ///
    /// Only resolves to fatal errors; see [`GenerateError::is_fatal`].
    fn generate_async(&self) -> impl Future<Output = Result<Scru64Id, GenerateError>>;
}

impl<C, T> Scru64GeneratorAsyncSmolExt for Scru64Generator<C, T>
where
    C: CounterMode,
    T: TimeSource<u64>,
{
    fn generate_async(&self) -> impl Future<Output = Result<Scru64Id, GenerateError>> {
        self.generate_or_await::<SmolSleep>()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{DEFAULT_ROLLBACK_ALLOWANCE, NodeSpec};

    const START: u64 = 1_577_836_800_000;

    struct MockStepTime {
        values: Vec<u64>,
        index: AtomicUsize,
    }

    impl TimeSource<u64> for MockStepTime {
        fn current_millis(&self) -> u64 {
            let i = self.index.fetch_add(1, Ordering::Relaxed);
            self.values[i.min(self.values.len() - 1)]
        }
    }

    #[test]
    fn awaits_until_clock_catches_up() {
        let back = START - DEFAULT_ROLLBACK_ALLOWANCE - 0x100;
        let time = MockStepTime {
            values: vec![START, back, back, START + 0x100],
            index: AtomicUsize::new(0),
        };
        let generator = Scru64Generator::with_time("42/8".parse().unwrap(), time);

        smol::block_on(async {
            let a = Scru64GeneratorAsyncSmolExt::generate_async(&generator)
                .await
                .unwrap();
            let b = generator.generate_or_await::<SmolYield>().await.unwrap();
            assert!(a < b);
            assert_eq!(b.timestamp(), (START >> 8) + 1);
        });
    }

    #[test]
    fn generates_many_unique_ids_across_tasks() {
        let node_spec: NodeSpec = "0xb00/12".parse().unwrap();
        let generator = Scru64Generator::new(node_spec);

        let ids = smol::block_on(async {
            let tasks: Vec<_> = (0..8)
                .map(|_| {
                    let g = generator.clone();
                    smol::spawn(async move {
                        let mut ids = Vec::with_capacity(1024);
                        for _ in 0..1024 {
                            ids.push(g.generate_or_await::<SmolSleep>().await.unwrap());
                        }
                        ids
                    })
                })
                .collect();

            let mut all = Vec::new();
            for task in tasks {
                all.extend(task.await);
            }
            all
        });

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 8 * 1024);
        assert!(ids.iter().all(|id| id.node_ctr() >> 12 == 0xb00));
    }
}
