//! Local-memory parameter flow
//!
//! Finds the kernel parameters whose values reach the size argument of a
//! `KernelContext.allocate*LocalArray(size)` call, so harnesses can keep
//! them small.

mod analyzer;

pub use analyzer::LocalMemoryAnalyzer;
