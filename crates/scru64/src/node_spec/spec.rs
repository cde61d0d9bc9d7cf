use core::{fmt, str::FromStr};

use crate::{ConfigError, ENCODED_LEN, Error, NODE_CTR_SIZE, ParseError, Scru64Id};

/// A node configuration specifier used to build a [`Scru64Generator`].
///
/// A `NodeSpec` is usually expressed as a node spec string, which starts with
/// a decimal `node_id`, a hexadecimal `node_id` prefixed by `0x`, or a 12-digit
/// `node_prev` SCRU64 ID, followed by a slash and a decimal `node_id_size`
/// ranging from 1 to 23 (e.g., `"42/8"`, `"0xb00/12"`, `"0u2r85hm2pt3/16"`).
/// The first two forms create a fresh generator with the given `node_id`,
/// while the third continues the lineage of `node_prev`, recovering the node
/// ID from its `node_ctr` field. This lets a restarted process keep emitting
/// IDs greater than the ones it produced before.
///
/// ```
/// use scru64::NodeSpec;
///
/// let spec: NodeSpec = "0xb00/12".parse().unwrap();
/// assert_eq!(spec.node_id(), 0xb00);
/// assert_eq!(spec.node_id_size(), 12);
/// assert_eq!(spec.to_string(), "2816/12");
/// ```
///
/// [`Scru64Generator`]: crate::Scru64Generator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeSpec {
    node_prev: Scru64Id,
    node_id_size: u8,
}

impl NodeSpec {
    /// Creates a node spec from a `node_id` and `node_id_size` pair.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `node_id_size` is zero or greater than 23,
    /// or if `node_id` does not fit in `node_id_size` bits.
    pub fn with_node_id(node_id: u32, node_id_size: u8) -> Result<Self, ConfigError> {
        check_node_id_size(node_id_size)?;
        if node_id >= 1 << node_id_size {
            return Err(ConfigError::NodeIdOverflow {
                node_id,
                node_id_size,
            });
        }

        let counter_size = NODE_CTR_SIZE - node_id_size;
        let node_prev = Scru64Id::from_parts(0, node_id << counter_size).map_err(|_| {
            ConfigError::NodeIdOverflow {
                node_id,
                node_id_size,
            }
        })?;
        Ok(Self {
            node_prev,
            node_id_size,
        })
    }

    /// Creates a node spec that continues from a previously generated ID.
    ///
    /// The node ID is taken from the upper `node_id_size` bits of
    /// `node_prev`'s `node_ctr` field, so it is always in range.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `node_id_size` is zero or greater than 23.
    pub fn with_node_prev(node_prev: Scru64Id, node_id_size: u8) -> Result<Self, ConfigError> {
        check_node_id_size(node_id_size)?;
        Ok(Self {
            node_prev,
            node_id_size,
        })
    }

    /// Returns the `node_id` given at creation or encoded in `node_prev`.
    pub const fn node_id(&self) -> u32 {
        self.node_prev.node_ctr() >> self.counter_size()
    }

    /// Returns the `node_id_size` value.
    pub const fn node_id_size(&self) -> u8 {
        self.node_id_size
    }

    /// Returns the width of the counter portion, `24 - node_id_size`.
    pub const fn counter_size(&self) -> u8 {
        NODE_CTR_SIZE - self.node_id_size
    }

    /// Returns the `node_prev` value if the node spec was built from one.
    ///
    /// A `node_prev` with a zero `timestamp` is indistinguishable from a bare
    /// node ID and reported as `None`.
    pub const fn node_prev(&self) -> Option<Scru64Id> {
        if self.node_prev.timestamp() > 0 {
            Some(self.node_prev)
        } else {
            None
        }
    }

    /// The seed state for a generator: `node_prev`, or a zero-timestamp ID
    /// carrying just the node ID.
    pub(crate) const fn seed(&self) -> Scru64Id {
        self.node_prev
    }

    /// Replaces the seed while keeping `node_id_size`. The caller guarantees
    /// that `node_prev` carries the same node ID.
    pub(crate) const fn with_seed(self, node_prev: Scru64Id) -> Self {
        Self {
            node_prev,
            node_id_size: self.node_id_size,
        }
    }

    /// Creates a node spec from a node spec string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the string does not follow the node spec
    /// syntax and [`Error::Config`] if it does but its values are out of
    /// range.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let (node, size) = s.split_once('/').ok_or(ParseError::NodeSpecSyntax)?;
        let node = parse_node(node).ok_or(ParseError::NodeSpecSyntax)?;
        let node_id_size = parse_digits(size, 3, 10).ok_or(ParseError::NodeSpecSyntax)?;

        let node_id_size = u8::try_from(node_id_size)
            .map_err(|_| ConfigError::NodeIdSize { node_id_size })?;
        let spec = match node {
            Node::Prev(node_prev) => Self::with_node_prev(node_prev, node_id_size)?,
            Node::Id(node_id) => Self::with_node_id(node_id, node_id_size)?,
        };
        Ok(spec)
    }
}

fn check_node_id_size(node_id_size: u8) -> Result<(), ConfigError> {
    if 0 < node_id_size && node_id_size < NODE_CTR_SIZE {
        Ok(())
    } else {
        Err(ConfigError::NodeIdSize {
            node_id_size: u32::from(node_id_size),
        })
    }
}

enum Node {
    Prev(Scru64Id),
    Id(u32),
}

/// Parses `ID12 | DEC{1,8} | 0[xX]HEX{1,6}`.
fn parse_node(s: &str) -> Option<Node> {
    if s.len() == ENCODED_LEN {
        return Scru64Id::parse(s).ok().map(Node::Prev);
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_digits(hex, 6, 16).map(Node::Id);
    }
    parse_digits(s, 8, 10).map(Node::Id)
}

/// Parses 1 to `max_len` digits of `radix`, rejecting signs and whitespace
/// that `from_str_radix` would otherwise tolerate.
fn parse_digits(s: &str, max_len: usize, radix: u32) -> Option<u32> {
    if s.is_empty() || s.len() > max_len || !s.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(s, radix).ok()
}

impl fmt::Display for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node_prev() {
            Some(node_prev) => write!(f, "{node_prev}/{}", self.node_id_size),
            None => write!(f, "{}/{}", self.node_id(), self.node_id_size),
        }
    }
}

impl FromStr for NodeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for NodeSpec {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
