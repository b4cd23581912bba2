pub mod composer;
pub mod formatters;
pub mod types;

pub use composer::*;
pub use formatters::*;
pub use types::*;
