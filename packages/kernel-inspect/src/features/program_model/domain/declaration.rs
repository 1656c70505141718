//! Resolution targets

use serde::{Deserialize, Serialize};

use crate::shared::models::{ClassId, FieldId, MethodId, NodeId};

/// What a reference expression resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Declaration {
    Method(MethodId),
    /// `index`-th parameter of `method`
    Parameter { method: MethodId, index: usize },
    /// Local variable, lambda parameter, for-each variable or catch
    /// parameter, keyed by its declaration node
    Local(NodeId),
    Field(FieldId),
    Class(ClassId),
}
