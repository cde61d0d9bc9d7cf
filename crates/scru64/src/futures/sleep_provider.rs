use core::{future::Future, time::Duration};

/// A trait that abstracts over how to sleep for a given [`Duration`] in async
/// contexts.
///
/// This allows [`generate_or_await`] to be generic over runtimes like `Tokio`
/// or `Smol`.
///
/// [`generate_or_await`]: crate::Scru64GeneratorAsyncExt::generate_or_await
pub trait SleepProvider {
    /// Returns a future that completes after `dur` has elapsed. The future
    /// must be `Send` so that a task awaiting it can move across threads.
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}
