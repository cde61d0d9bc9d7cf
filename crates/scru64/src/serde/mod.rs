//! Serde support (feature `serde`).
//!
//! [`Scru64Id`](crate::Scru64Id) and [`NodeSpec`](crate::NodeSpec) serialize
//! as their canonical strings and deserialize through the same validation as
//! `parse`. Use [`as_native`] to store IDs as integers instead.
mod node_spec;
mod scru64;

pub use self::scru64::as_native;
