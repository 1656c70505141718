//! Runnable kernel tasks
//!
//! Lists the kernels of a file that can be handed to a harness generator:
//! parsed cleanly, return void, and not flagged by any rule.

mod catalog;

pub use catalog::{TaskCatalog, TaskEntry};
