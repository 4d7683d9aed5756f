//! Places a region's bytes can come from besides the call stack.

pub mod heap;
pub mod pool;

pub use heap::HeapBlock;
pub use pool::{BufferPool, PoolConfig, PooledBuffer};
