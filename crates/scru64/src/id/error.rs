/// Errors returned when a string is not a valid textual representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The ID string is not exactly 12 bytes long.
    #[error("could not parse string as SCRU64 ID: invalid length: {len} bytes (expected 12)")]
    InvalidLength {
        /// Length of the rejected input in bytes.
        len: usize,
    },

    /// An ASCII byte outside of the base36 alphabet.
    #[error("could not parse string as SCRU64 ID: invalid digit {:?} at {index}", char::from(*.byte))]
    InvalidDigit {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending byte.
        index: usize,
    },

    /// A byte that is not ASCII at all.
    #[error("could not parse string as SCRU64 ID: found non-ASCII digit at {index}")]
    NonAsciiDigit {
        /// Byte offset of the offending byte.
        index: usize,
    },

    /// The node spec string does not follow the `<node>/<node_id_size>`
    /// syntax.
    #[error(
        r#"could not parse string as node spec (expected: e.g., "42/8", "0xb00/12", "0u2r85hm2pt3/16")"#
    )]
    NodeSpecSyntax,
}

/// Errors returned when an integer does not fit in its target field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum RangeError {
    /// The integer is negative or larger than `36^12 - 1`.
    #[error("could not convert integer to SCRU64 ID: out of range: {value}")]
    Integer {
        /// The rejected value.
        value: i128,
    },

    /// The `timestamp` field value is larger than
    /// [`Scru64Id::MAX_TIMESTAMP`](crate::Scru64Id::MAX_TIMESTAMP).
    #[error("could not create SCRU64 ID from parts: `timestamp` out of range: {timestamp}")]
    Timestamp {
        /// The rejected timestamp.
        timestamp: u64,
    },

    /// The `node_ctr` field value does not fit in 24 bits.
    #[error("could not create SCRU64 ID from parts: `node_ctr` out of range: {node_ctr}")]
    NodeCtr {
        /// The rejected field value.
        node_ctr: u32,
    },

    /// A clock reading that rounds down to a zero timestamp.
    #[error("`timestamp` must be greater than zero")]
    ZeroTimestamp,

    /// A rollback allowance of `2^40` ticks or more.
    #[error("`rollback_allowance` out of reasonable range: {allowance} ms")]
    RollbackAllowance {
        /// The rejected allowance in milliseconds.
        allowance: u64,
    },
}
