//! Backward trace from allocation sizes to parameters
//!
//! One forward scan collects allocation calls; each size argument is then
//! traced backwards through parentheses, prefix operators, casts, binary
//! operands and conditional branches. A local variable is followed one hop:
//! its initializer and every assignment to it. Locals reached through that
//! hop are not followed again.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::{InspectionConfig, DEFAULT_KERNEL_CONTEXT_TYPE};
use crate::features::program_model::visitor::{collect_calls, walk_expr};
use crate::features::program_model::{Declaration, Expr, ExprKind, Method, ProgramModel, Visitor};
use crate::shared::models::NodeId;

lazy_static! {
    static ref ALLOCATE_LOCAL_ARRAY: Option<Regex> =
        Regex::new(r"^allocate(Float|Int|Double|Long|Byte|HalfFloat|Short)LocalArray$").ok();
}

pub struct LocalMemoryAnalyzer {
    context_type: String,
}

impl Default for LocalMemoryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalMemoryAnalyzer {
    pub fn new() -> Self {
        Self {
            context_type: DEFAULT_KERNEL_CONTEXT_TYPE.to_string(),
        }
    }

    pub fn from_config(config: &InspectionConfig) -> Self {
        Self {
            context_type: config.kernel_context_type.clone(),
        }
    }

    /// Names of `method`'s parameters that flow into a local-memory
    /// allocation size; empty when there is no body or no parameter
    pub fn find_local_memory_parameters(&self, model: &dyn ProgramModel, method: &Method) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        if method.body.is_none() || method.parameters.is_empty() {
            return found;
        }

        for expr in collect_calls(method) {
            if !self.is_allocate_local_array(model, method, expr) {
                continue;
            }
            if let Some(size) = expr.as_call().and_then(|call| call.arguments.first()) {
                trace(model, method, size, true, &mut found);
            }
        }

        if !found.is_empty() {
            debug!(method = %method.name, parameters = ?found, "local memory parameters");
        }
        found
    }

    /// `<context-typed qualifier>.allocate<Kind>LocalArray(..)`
    pub fn is_allocate_local_array(&self, model: &dyn ProgramModel, method: &Method, expr: &Expr) -> bool {
        let Some(call) = expr.as_call() else {
            return false;
        };
        let name_matches = ALLOCATE_LOCAL_ARRAY
            .as_ref()
            .is_some_and(|re| re.is_match(&call.name));
        if !name_matches {
            return false;
        }
        call.qualifier
            .as_deref()
            .and_then(|q| model.expression_type(q, method))
            .is_some_and(|ty| ty.array_dims == 0 && ty.canonical.ends_with(&self.context_type))
    }
}

fn trace(
    model: &dyn ProgramModel,
    method: &Method,
    expr: &Expr,
    follow_locals: bool,
    found: &mut BTreeSet<String>,
) {
    match &expr.kind {
        ExprKind::Reference(reference) => match reference.target {
            Some(Declaration::Parameter { method: owner, index }) if owner == method.id => {
                if let Some(parameter) = method.parameters.get(index) {
                    found.insert(parameter.name.clone());
                }
            }
            Some(Declaration::Local(local)) if follow_locals => {
                if let Some(init) = model
                    .find_variable(method, local)
                    .and_then(|l| l.initializer.as_ref())
                {
                    trace(model, method, init, false, found);
                }
                for value in assigned_values(method, local) {
                    trace(model, method, value, false, found);
                }
            }
            _ => {}
        },
        ExprKind::Parenthesized(inner) => trace(model, method, inner, follow_locals, found),
        ExprKind::Unary {
            operand,
            prefix: true,
            ..
        } => trace(model, method, operand, follow_locals, found),
        ExprKind::Cast { operand, .. } => trace(model, method, operand, follow_locals, found),
        ExprKind::Binary { left, right, .. } => {
            trace(model, method, left, follow_locals, found);
            trace(model, method, right, follow_locals, found);
        }
        ExprKind::Conditional {
            then_expr,
            else_expr,
            ..
        } => {
            trace(model, method, then_expr, follow_locals, found);
            trace(model, method, else_expr, follow_locals, found);
        }
        ExprKind::Unary { prefix: false, .. }
        | ExprKind::Literal(_)
        | ExprKind::This { .. }
        | ExprKind::Call(_)
        | ExprKind::New(_)
        | ExprKind::Assignment { .. }
        | ExprKind::ArrayAccess { .. }
        | ExprKind::NewArray { .. }
        | ExprKind::Lambda { .. }
        | ExprKind::Other(_) => {}
    }
}

/// Right-hand sides of every assignment to local `target` in `method`
fn assigned_values(method: &Method, target: NodeId) -> Vec<&Expr> {
    struct Assignments<'a> {
        target: NodeId,
        values: Vec<&'a Expr>,
    }
    impl<'a> Visitor<'a> for Assignments<'a> {
        fn visit_expr(&mut self, expr: &'a Expr) {
            if let ExprKind::Assignment { target, value, .. } = &expr.kind {
                let assigns_target = target
                    .strip_parens()
                    .as_reference()
                    .is_some_and(|r| r.target == Some(Declaration::Local(self.target)));
                if assigns_target {
                    self.values.push(value);
                }
            }
            walk_expr(self, expr);
        }
    }

    let mut assignments = Assignments {
        target,
        values: Vec::new(),
    };
    crate::features::program_model::visitor::walk_method(&mut assignments, method);
    assignments.values
}
