//! Feature slices, leaves first

pub mod program_model;
pub mod java_frontend;
pub mod restricted_api;
pub mod call_graph;
pub mod local_memory;
pub mod problem_registry;
pub mod rule_checks;
pub mod task_catalog;
