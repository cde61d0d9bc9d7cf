use crate::RangeError;

/// Errors returned by [`Scru64Generator`](crate::Scru64Generator).
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The clock went back further than the rollback allowance. Retrying
    /// once the clock has caught up is expected to succeed.
    #[error("clock went backwards beyond the rollback allowance")]
    ClockRollback,

    /// The `timestamp` field reached its maximum value. The generator will
    /// not produce any more IDs.
    #[error("could not generate SCRU64 ID: `timestamp` field exhausted")]
    Exhausted,

    /// The clock reading or rollback allowance argument is out of range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// The generator state lock was poisoned by a panicking thread.
    ///
    /// `parking_lot` mutexes do not poison, so this variant only exists
    /// without the `parking-lot` feature.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl GenerateError {
    /// Returns `true` unless retrying the same call later may succeed.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::ClockRollback)
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};

#[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for GenerateError {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
