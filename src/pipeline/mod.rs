pub mod chunk;
pub mod pack;
pub mod parallel;
pub mod run;

pub use chunk::*;
pub use pack::*;
pub use parallel::*;
pub use run::*;
