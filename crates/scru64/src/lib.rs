//! # SCRU64: Sortable, Clock-based, Realm-specifically Unique identifier
//!
//! SCRU64 IDs are 64-bit unsigned integers rendered as fixed-width,
//! 12-character base36 strings. Each ID packs a 40-bit timestamp (256 ms
//! ticks since the Unix epoch) and a 24-bit `node_ctr` field that a
//! [`Scru64Generator`] splits into a node ID and a per-tick counter according
//! to its [`NodeSpec`].
//!
//! ```
//! use scru64::{NodeSpec, Scru64Generator};
//!
//! let node_spec: NodeSpec = "42/8".parse().unwrap();
//! let generator = Scru64Generator::new(node_spec);
//!
//! let a = generator.generate_or_sleep().unwrap();
//! let b = generator.generate_or_sleep().unwrap();
//! assert!(a < b);
//! assert!(a.to_string() < b.to_string());
//! assert_eq!(a.node_ctr() >> 16, 42);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod counter;
mod error;
#[cfg(feature = "futures")]
mod futures;
mod generator;
mod id;
mod lazy;
mod node_spec;
mod rand;
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::counter::*;
pub use crate::error::*;
#[cfg(feature = "futures")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::lazy::*;
pub use crate::node_spec::*;
pub use crate::rand::*;
pub use crate::time::*;
