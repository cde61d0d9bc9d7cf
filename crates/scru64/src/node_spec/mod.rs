mod error;
mod spec;

pub use error::*;
pub use spec::*;
