pub mod selection;
pub mod valuation;

pub use selection::*;
pub use valuation::*;
