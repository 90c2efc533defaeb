//! Drawing cards: weighted sampling, slot allocation, and pack opening.

pub mod allocator;
pub mod opening;
pub mod pool;
pub mod sampler;

pub use allocator::*;
pub use opening::*;
pub use pool::*;
pub use sampler::*;
