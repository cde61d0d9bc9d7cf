use core::fmt;

use ::serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::{ENCODED_LEN, Scru64Id};

impl Serialize for Scru64Id {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0_u8; ENCODED_LEN];
        s.serialize_str(self.encode_to_buf(&mut buf))
    }
}

impl<'de> Deserialize<'de> for Scru64Id {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = Scru64Id;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a 12-digit SCRU64 ID string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Scru64Id::parse(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(IdVisitor)
    }
}

/// Serializes a [`Scru64Id`] as its native `u64` representation.
///
/// ```
/// use scru64::Scru64Id;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "scru64::serde::as_native")]
///     id: Scru64Id,
/// }
/// ```
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Scru64Id;

    /// Serialize an ID as its integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Scru64Id, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_u64().serialize(s)
    }

    /// Deserialize an ID from its integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The integer is larger than [`Scru64Id::MAX`]
    pub fn deserialize<'de, D>(d: D) -> Result<Scru64Id, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = u64::deserialize(d)?;
        Scru64Id::from_u64(n).map_err(::serde::de::Error::custom)
    }
}
