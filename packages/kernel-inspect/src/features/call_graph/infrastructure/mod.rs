mod resolver;

pub use resolver::{CacheStats, CallGraphResolver, MAX_INLINE_DEPTH};
