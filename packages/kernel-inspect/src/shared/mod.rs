//! Shared module - Common types
//!
//! This module contains types that are shared across all features.
//! It has no parser or runtime dependencies.

pub mod models;

// Re-exports for convenience
pub use models::*;
