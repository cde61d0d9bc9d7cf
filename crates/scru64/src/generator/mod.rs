mod error;
mod lock;
mod mutex;
mod policy;

pub use error::*;
pub use lock::*;
pub(crate) use mutex::*;
pub use policy::*;
