mod generator;
mod source;
#[cfg(test)]
mod tests;

pub use generator::*;
pub use source::*;
