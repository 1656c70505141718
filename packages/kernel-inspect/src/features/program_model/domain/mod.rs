//! Program model domain: entities, syntax trees and traversal

mod declaration;
mod entities;
mod syntax;
mod types;
pub mod visitor;

pub use declaration::Declaration;
pub use entities::{Class, ClassKind, Field, Import, Method, SourceFile, SourceOrigin};
pub use syntax::{
    CallExpr, CatchClause, Expr, ExprKind, LiteralKind, LocalVariable, NewExpr, Parameter,
    ReferenceExpr, Stmt, StmtKind, TryStmt,
};
pub use types::{Annotation, Modifiers, TypeRef, TypeUse, PRIMITIVE_TYPES};
pub use visitor::Visitor;
