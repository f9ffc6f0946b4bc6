pub mod hash;
pub mod table;

pub use hash::*;
pub use table::*;
