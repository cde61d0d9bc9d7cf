mod base36;
mod error;
mod scru64;

pub use base36::ENCODED_LEN;
pub use error::*;
pub use scru64::*;
