use crate::{ConfigError, GenerateError, ParseError, RangeError};

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `scru64` can emit.
///
/// Each variant wraps the narrower error type returned by the operation that
/// failed, so callers that only deal with one kind of failure can match on
/// that type directly and callers that mix operations can bubble everything up
/// with `?`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed textual representation of an ID or a node spec.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An integer or field value outside of the encodable range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// An invalid node configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// ID generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}
