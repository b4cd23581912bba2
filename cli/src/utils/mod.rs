pub mod logger;
pub mod money;
pub mod overlap;
pub mod winner;

pub use logger::*;
pub use money::*;
pub use overlap::*;
pub use winner::*;
