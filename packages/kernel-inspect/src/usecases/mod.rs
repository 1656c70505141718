//! Usecase Layer - High-level inspection operations
//!
//! Entry points used by the CLI and by embedders that keep a program model
//! alive across edits:
//! - `InspectionSession::inspect_file` for diagnostics of one file
//! - `InspectionSession::runnable_tasks` for the task list

pub mod inspection_session;

// Re-export main API
pub use inspection_session::{InspectionReport, InspectionSession};
