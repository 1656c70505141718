//! Typed arena ids
//!
//! Every entity of the program model is addressed by a small copyable id.
//! `NodeId` is global: each statement, expression, variable and type use gets
//! a fresh one, so violations and call sites can be keyed without borrowing
//! the tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Position of the entity in its arena
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Source file id
    FileId,
    "file"
);
arena_id!(
    /// Class (or interface / enum) id
    ClassId,
    "class"
);
arena_id!(
    /// Method (or constructor) id
    MethodId,
    "method"
);
arena_id!(
    /// Field id
    FieldId,
    "field"
);
arena_id!(
    /// Syntax node id (statements, expressions, declarations, type uses)
    NodeId,
    "node"
);

static NEXT_NODE: AtomicU32 = AtomicU32::new(1);

impl NodeId {
    /// Allocate a process-unique node id
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE.fetch_add(1, Ordering::Relaxed))
    }
}
