use core::{fmt, str::FromStr};

use crate::{
    ParseError, RangeError,
    id::base36::{ENCODED_LEN, decode_base36, encode_base36},
};

/// Bit width of the combined `node_ctr` field.
pub const NODE_CTR_SIZE: u8 = 24;

/// A SCRU64 ID: a 64-bit unsigned integer no greater than `36^12 - 1`.
///
/// ```text
///  Bit Index:  63                      24 23                     0
///              +--------------------------+------------------------+
///  Field:      |   timestamp (40 bits)    |   node_ctr (24 bits)   |
///              +--------------------------+------------------------+
///              |<------ MSB ----------- 64 bits ---------- LSB ---->|
/// ```
///
/// - `timestamp` counts 256-millisecond ticks since the Unix epoch.
/// - `node_ctr` holds the node ID in its upper bits and a per-tick counter in
///   its lower bits. The split point is a property of the [`NodeSpec`] that
///   produced the ID, not of the ID itself.
///
/// Values only come into existence through validated constructors, so the
/// accessors never need to re-check the range. The integer order, the order of
/// the `(timestamp, node_ctr)` tuple, and the lexicographic order of the
/// 12-digit textual form all agree.
///
/// [`NodeSpec`]: crate::NodeSpec
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Scru64Id(u64);

impl Scru64Id {
    /// The minimum valid SCRU64 ID (`000000000000`).
    pub const MIN: Self = Self(0);

    /// The maximum valid SCRU64 ID (`zzzzzzzzzzzz`).
    pub const MAX: Self = Self(4_738_381_338_321_616_895);

    /// The maximum valid value of the `timestamp` field.
    pub const MAX_TIMESTAMP: u64 = Self::MAX.0 >> NODE_CTR_SIZE;

    /// The maximum valid value of the combined `node_ctr` field.
    pub const MAX_NODE_CTR: u32 = (1 << NODE_CTR_SIZE) - 1;

    /// Creates a value from a 64-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Integer`] if `value` is larger than `36^12 - 1`.
    pub const fn from_u64(value: u64) -> Result<Self, RangeError> {
        if value > Self::MAX.0 {
            Err(RangeError::Integer {
                value: value as i128,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Creates a value from the `timestamp` and the combined `node_ctr` field
    /// values.
    ///
    /// # Errors
    ///
    /// Returns an error if either argument exceeds its field's maximum
    /// ([`Self::MAX_TIMESTAMP`] and [`Self::MAX_NODE_CTR`]).
    ///
    /// # Example
    ///
    /// ```
    /// use scru64::Scru64Id;
    ///
    /// let id = Scru64Id::from_parts(0, 16_777_215).unwrap();
    /// assert_eq!(id.to_string(), "00000009zldr");
    /// ```
    pub const fn from_parts(timestamp: u64, node_ctr: u32) -> Result<Self, RangeError> {
        if timestamp > Self::MAX_TIMESTAMP {
            Err(RangeError::Timestamp { timestamp })
        } else if node_ctr > Self::MAX_NODE_CTR {
            Err(RangeError::NodeCtr { node_ctr })
        } else {
            // `MAX` is exactly `MAX_TIMESTAMP << 24 | MAX_NODE_CTR`, so the
            // per-field checks are sufficient.
            Ok(Self((timestamp << NODE_CTR_SIZE) | node_ctr as u64))
        }
    }

    /// Returns the integer representation.
    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Returns the `timestamp` field value.
    pub const fn timestamp(self) -> u64 {
        self.0 >> NODE_CTR_SIZE
    }

    /// Returns the `node_id` and `counter` field values combined as a single
    /// integer.
    pub const fn node_ctr(self) -> u32 {
        (self.0 as u32) & Self::MAX_NODE_CTR
    }

    /// Creates a value from a 12-digit string representation.
    ///
    /// Upper-case digits are accepted. Nothing is trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if `s` is not exactly 12 base36 digits.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        decode_base36(s.as_bytes()).map(Self)
    }

    /// Writes the 12-digit canonical representation into `buf` without heap
    /// allocation and returns it as a string slice.
    ///
    /// ```
    /// use scru64::Scru64Id;
    ///
    /// let mut buf = [0_u8; 12];
    /// assert_eq!(Scru64Id::MAX.encode_to_buf(&mut buf), "zzzzzzzzzzzz");
    /// ```
    pub fn encode_to_buf<'a>(&self, buf: &'a mut [u8; ENCODED_LEN]) -> &'a str {
        encode_base36(self.0, buf);
        // `encode_base36` only writes bytes from its ASCII alphabet
        debug_assert!(buf.is_ascii(), "base36 digits must be ASCII");
        core::str::from_utf8(buf).unwrap_or_default()
    }
}

impl fmt::Display for Scru64Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0_u8; ENCODED_LEN];
        f.pad(self.encode_to_buf(&mut buf))
    }
}

impl fmt::Debug for Scru64Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0_u8; ENCODED_LEN];
        f.debug_struct("Scru64Id")
            .field("id", &self.encode_to_buf(&mut buf))
            .field("timestamp", &self.timestamp())
            .field("node_ctr", &self.node_ctr())
            .finish()
    }
}

impl FromStr for Scru64Id {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Scru64Id {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<u64> for Scru64Id {
    type Error = RangeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_u64(value)
    }
}

/// Signed conversion for storage layers that only offer `BIGINT`-like
/// columns.
impl TryFrom<i64> for Scru64Id {
    type Error = RangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .ok()
            .and_then(|v| Self::from_u64(v).ok())
            .ok_or(RangeError::Integer {
                value: i128::from(value),
            })
    }
}

impl From<Scru64Id> for u64 {
    fn from(value: Scru64Id) -> Self {
        value.0
    }
}

impl From<Scru64Id> for i64 {
    fn from(value: Scru64Id) -> Self {
        // `MAX` is below `i64::MAX`
        value.0 as i64
    }
}
