//! Error types for kernel-inspect
//!
//! Provides unified error handling across the crate. Rule checks and the
//! call-graph resolver never fail: findings are violations, not errors.
//! Only the front end, configuration and I/O surface errors.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for kernel-inspect operations
#[derive(Debug, Error)]
pub enum InspectError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (tree-sitter could not produce a tree)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Analysis error (unknown file or method id handed to a usecase)
    #[error("Analysis error: {0}")]
    Analysis(String),
}

impl InspectError {
    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        InspectError::Parse(msg.into())
    }

    /// Create an analysis error
    pub fn analysis(msg: impl Into<String>) -> Self {
        InspectError::Analysis(msg.into())
    }
}

/// Result type alias for kernel-inspect operations
pub type Result<T> = std::result::Result<T, InspectError>;
