//! Common test utilities for kernel-inspect
//!
//! Shared Java fixtures, program builders and assertions for the
//! integration tests. Each test binary uses a different subset.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
