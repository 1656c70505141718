//! Program Model Feature
//!
//! Read-only program tree consumed by the analyses, plus the in-memory
//! arena that implements it.
//!
//! ## Structure
//! - `domain/` - Entities, closed statement/expression sum types, visitor
//! - `ports/` - `ProgramModel` trait
//! - `infrastructure/` - `Program` arena with revision-bumping edits

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::*;
pub use infrastructure::Program;
pub use ports::ProgramModel;
