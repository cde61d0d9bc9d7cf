mod default;
mod interface;

pub use default::*;
pub use interface::*;
