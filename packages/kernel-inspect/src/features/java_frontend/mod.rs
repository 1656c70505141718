//! Java front end: tree-sitter parsing, extraction and name resolution

mod extract;
mod frontend;
mod jdk;
mod resolve;

pub use extract::{type_ref_from_text, SpanExt};
pub use frontend::JavaFrontend;
pub use resolve::LIBRARY_STUB_PATH;
