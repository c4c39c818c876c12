mod pool;
mod stake;

pub use pool::*;
pub use stake::*;
