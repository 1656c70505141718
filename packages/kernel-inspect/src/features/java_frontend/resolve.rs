//! Name resolution over the extracted program
//!
//! Phases:
//! 1. Class index (qualified name → class)
//! 2. Qualify signatures (supertypes, fields, parameters, returns, throws,
//!    annotations) through nesting, package, imports and `java.lang`
//! 3. Member index (class → methods / fields by name)
//! 4. Resolve every method body: each body is taken out of the arena,
//!    resolved against a lexical scope stack, then put back
//!
//! Calls that land on library classes resolve to body-less stub methods
//! created on demand in a synthetic library file.

use rustc_hash::FxHashMap;
use std::path::Path;
use tracing::debug;

use super::jdk;
use crate::features::program_model::{
    Class, ClassKind, Declaration, Expr, ExprKind, Field, LiteralKind, LocalVariable, Method,
    Modifiers, Parameter, Program, ProgramModel, SourceOrigin, Stmt, StmtKind, TypeRef, TypeUse,
    PRIMITIVE_TYPES,
};
use crate::shared::models::{ClassId, FieldId, FileId, MethodId, NodeId, Span};

/// Path of the synthetic file holding library stubs
pub const LIBRARY_STUB_PATH: &str = "<library>";

#[derive(Debug, Clone, Copy)]
struct MethodCtx {
    method: MethodId,
    class: Option<ClassId>,
    file: FileId,
}

/// Lexical scope stack: innermost frame last
#[derive(Default)]
struct Scope {
    frames: Vec<Vec<(String, Declaration)>>,
}

impl Scope {
    fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn declare(&mut self, name: &str, decl: Declaration) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push((name.to_string(), decl));
        }
    }

    fn lookup(&self, name: &str) -> Option<Declaration> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(n, _)| n == name)
            .map(|(_, d)| *d)
    }
}

#[derive(Default)]
pub struct Resolver {
    classes: FxHashMap<String, ClassId>,
    methods: FxHashMap<ClassId, FxHashMap<String, Vec<MethodId>>>,
    fields: FxHashMap<ClassId, FxHashMap<String, FieldId>>,
    local_types: FxHashMap<NodeId, TypeRef>,
    library_file: Option<FileId>,
}

impl Resolver {
    /// Run every resolution phase over `program`
    pub fn resolve_program(program: &mut Program) {
        let mut resolver = Resolver::default();
        resolver.index_classes(program);
        resolver.qualify_signatures(program);
        resolver.index_members(program);

        let library_file = resolver.library_file;
        let method_ids: Vec<MethodId> = program
            .methods()
            .filter(|m| Some(m.file) != library_file && m.body.is_some())
            .map(|m| m.id)
            .collect();

        for id in &method_ids {
            resolver.resolve_method_body(program, *id);
        }

        debug!(
            methods = method_ids.len(),
            classes = resolver.classes.len(),
            "resolved program"
        );
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Phase 1 + 3: indexes
    // ═══════════════════════════════════════════════════════════════════════

    fn index_classes(&mut self, program: &Program) {
        self.library_file = program
            .file_by_path(Path::new(LIBRARY_STUB_PATH))
            .map(|f| f.id);
        for class in program.classes() {
            self.classes
                .entry(class.qualified_name.clone())
                .or_insert(class.id);
        }
    }

    fn index_members(&mut self, program: &Program) {
        for method in program.methods() {
            if let Some(class) = method.class {
                self.methods
                    .entry(class)
                    .or_default()
                    .entry(method.name.clone())
                    .or_default()
                    .push(method.id);
            }
        }
        for class in program.classes() {
            for field_id in &class.fields {
                if let Some(field) = program.field(*field_id) {
                    self.fields
                        .entry(class.id)
                        .or_default()
                        .insert(field.name.clone(), field.id);
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Phase 2: type qualification
    // ═══════════════════════════════════════════════════════════════════════

    fn qualify_signatures(&mut self, program: &mut Program) {
        let classes: Vec<(ClassId, FileId, Option<ClassId>, Option<String>)> = program
            .classes()
            .map(|c| (c.id, c.file, c.outer, c.super_class.clone()))
            .collect();
        for (id, file, outer, super_class) in classes {
            if let Some(super_class) = super_class {
                let qualified = self.qualify(program, &super_class, file, outer);
                if let Some(class) = program.class_mut(id) {
                    class.super_class = Some(qualified);
                }
            }
        }

        let fields: Vec<(FieldId, ClassId, TypeRef)> = program
            .classes()
            .flat_map(|c| c.fields.iter().copied())
            .filter_map(|f| program.field(f).map(|field| (f, field.class, field.ty.ty.clone())))
            .collect();
        for (id, class, ty) in fields {
            let Some(file) = program.class(class).map(|c| c.file) else {
                continue;
            };
            let qualified = self.qualify_type(program, &ty, file, Some(class));
            if let Some(field) = program.field_mut(id) {
                field.ty.ty = qualified;
            }
        }

        let method_ids: Vec<MethodId> = program.methods().map(|m| m.id).collect();
        for id in method_ids {
            let Some(method) = program.method(id) else {
                continue;
            };
            let (file, class) = (method.file, method.class);
            let params: Vec<TypeRef> = method
                .parameters
                .iter()
                .map(|p| self.qualify_type(program, &p.ty.ty, file, class))
                .collect();
            let ret = method
                .return_type
                .as_ref()
                .map(|r| self.qualify_type(program, &r.ty, file, class));
            let throws: Vec<TypeRef> = method
                .throws
                .iter()
                .map(|t| self.qualify_type(program, &t.ty, file, class))
                .collect();
            let annotations: Vec<String> = method
                .annotations
                .iter()
                .chain(&method.inner_annotations)
                .map(|a| self.qualify(program, &a.qualified_name, file, class))
                .collect();

            if let Some(method) = program.method_mut(id) {
                for (param, ty) in method.parameters.iter_mut().zip(params) {
                    param.ty.ty = ty;
                }
                if let (Some(r), Some(ty)) = (method.return_type.as_mut(), ret) {
                    r.ty = ty;
                }
                for (t, ty) in method.throws.iter_mut().zip(throws) {
                    t.ty = ty;
                }
                let all = method.annotations.iter_mut().chain(&mut method.inner_annotations);
                for (a, name) in all.zip(annotations) {
                    a.qualified_name = name;
                }
            }
        }
    }

    fn qualify_type(
        &self,
        program: &Program,
        ty: &TypeRef,
        file: FileId,
        class: Option<ClassId>,
    ) -> TypeRef {
        TypeRef::array(self.qualify(program, &ty.canonical, file, class), ty.array_dims)
    }

    /// Qualify a written type name, or return it unchanged
    fn qualify(&self, program: &Program, name: &str, file: FileId, class: Option<ClassId>) -> String {
        if name == "void" || name == "var" || name == "?" || PRIMITIVE_TYPES.contains(&name) {
            return name.to_string();
        }
        if self.classes.contains_key(name) {
            return name.to_string();
        }
        match name.split_once('.') {
            // `Outer.Inner`; a lowercase head is already a package path
            Some((head, rest)) if starts_uppercase(head) => self
                .qualify_simple(program, head, file, class)
                .map(|q| format!("{}.{}", q, rest))
                .unwrap_or_else(|| name.to_string()),
            Some(_) => name.to_string(),
            None => self
                .qualify_simple(program, name, file, class)
                .unwrap_or_else(|| name.to_string()),
        }
    }

    fn qualify_simple(
        &self,
        program: &Program,
        name: &str,
        file: FileId,
        class: Option<ClassId>,
    ) -> Option<String> {
        // Enclosing classes and their members
        let mut current = class;
        while let Some(id) = current {
            let cls = program.class(id)?;
            if cls.name == name {
                return Some(cls.qualified_name.clone());
            }
            let nested = format!("{}.{}", cls.qualified_name, name);
            if self.classes.contains_key(&nested) {
                return Some(nested);
            }
            current = cls.outer;
        }

        let source = program.file(file)?;

        // Same package
        let in_package = match &source.package {
            Some(pkg) => format!("{}.{}", pkg, name),
            None => name.to_string(),
        };
        if self.classes.contains_key(&in_package) {
            return Some(in_package);
        }

        // Single-type imports
        if let Some(import) = source
            .imports
            .iter()
            .filter(|i| !i.on_demand && !i.is_static)
            .find(|i| i.path.rsplit('.').next() == Some(name))
        {
            return Some(import.path.clone());
        }

        if let Some(qualified) = jdk::java_lang_class(name) {
            return Some(qualified);
        }

        // On-demand imports: a known class first, then the first non-JDK package
        let on_demand: Vec<&str> = source
            .imports
            .iter()
            .filter(|i| i.on_demand && !i.is_static)
            .map(|i| i.path.as_str())
            .collect();
        if let Some(known) = on_demand
            .iter()
            .map(|pkg| format!("{}.{}", pkg, name))
            .find(|candidate| self.classes.contains_key(candidate))
        {
            return Some(known);
        }
        on_demand
            .iter()
            .find(|pkg| !pkg.starts_with("java."))
            .or_else(|| on_demand.first())
            .map(|pkg| format!("{}.{}", pkg, name))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Phase 4: bodies
    // ═══════════════════════════════════════════════════════════════════════

    fn resolve_method_body(&mut self, program: &mut Program, id: MethodId) {
        let Some(method) = program.method_mut(id) else {
            return;
        };
        let Some(mut body) = method.body.take() else {
            return;
        };
        let ctx = MethodCtx {
            method: id,
            class: method.class,
            file: method.file,
        };
        let params: Vec<String> = method.parameters.iter().map(|p| p.name.clone()).collect();

        let mut scope = Scope::default();
        scope.push();
        for (index, name) in params.iter().enumerate() {
            scope.declare(name, Declaration::Parameter { method: id, index });
        }

        self.resolve_stmt(program, &mut body, &mut scope, ctx);

        if let Some(method) = program.method_mut(id) {
            method.body = Some(body);
        }
    }

    fn resolve_stmt(&mut self, program: &mut Program, stmt: &mut Stmt, scope: &mut Scope, ctx: MethodCtx) {
        match &mut stmt.kind {
            StmtKind::LocalDecl(locals) => {
                for local in locals {
                    self.declare_local(program, local, scope, ctx);
                }
            }
            StmtKind::Expression(expr) | StmtKind::Throw(expr) => {
                self.resolve_expr(program, expr, scope, ctx);
            }
            StmtKind::Block(stmts) => {
                scope.push();
                for s in stmts {
                    self.resolve_stmt(program, s, scope, ctx);
                }
                scope.pop();
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(program, condition, scope, ctx);
                self.resolve_scoped(program, then_branch, scope, ctx);
                if let Some(else_branch) = else_branch {
                    self.resolve_scoped(program, else_branch, scope, ctx);
                }
            }
            StmtKind::Loop {
                init,
                condition,
                update,
                body,
            } => {
                scope.push();
                for s in init {
                    self.resolve_stmt(program, s, scope, ctx);
                }
                if let Some(condition) = condition {
                    self.resolve_expr(program, condition, scope, ctx);
                }
                for e in update {
                    self.resolve_expr(program, e, scope, ctx);
                }
                self.resolve_stmt(program, body, scope, ctx);
                scope.pop();
            }
            StmtKind::ForEach {
                variable,
                iterable,
                body,
            } => {
                self.resolve_expr(program, iterable, scope, ctx);
                scope.push();
                if variable.ty.ty.canonical == "var" {
                    variable.ty.ty = self
                        .type_of(program, iterable, ctx)
                        .filter(|t| t.array_dims > 0)
                        .map(|t| TypeRef::array(t.canonical, t.array_dims - 1))
                        .unwrap_or_else(TypeRef::unknown);
                }
                self.declare_variable(program, variable, scope, ctx);
                self.resolve_stmt(program, body, scope, ctx);
                scope.pop();
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.resolve_expr(program, value, scope, ctx);
                }
            }
            StmtKind::Try(try_stmt) => {
                scope.push();
                for resource in &mut try_stmt.resources {
                    self.resolve_stmt(program, resource, scope, ctx);
                }
                self.resolve_stmt(program, &mut try_stmt.body, scope, ctx);
                scope.pop();
                for catch in &mut try_stmt.catches {
                    scope.push();
                    self.declare_variable(program, &mut catch.parameter, scope, ctx);
                    self.resolve_stmt(program, &mut catch.body, scope, ctx);
                    scope.pop();
                }
                if let Some(finally) = &mut try_stmt.finally {
                    self.resolve_stmt(program, finally, scope, ctx);
                }
            }
            StmtKind::Assert { condition, message } => {
                self.resolve_expr(program, condition, scope, ctx);
                if let Some(message) = message {
                    self.resolve_expr(program, message, scope, ctx);
                }
            }
            // Members of local classes are resolved as ordinary methods
            StmtKind::LocalClass(_) => {}
            StmtKind::Other {
                statements,
                expressions,
            } => {
                for e in expressions {
                    self.resolve_expr(program, e, scope, ctx);
                }
                scope.push();
                for s in statements {
                    self.resolve_stmt(program, s, scope, ctx);
                }
                scope.pop();
            }
        }
    }

    fn resolve_scoped(&mut self, program: &mut Program, stmt: &mut Stmt, scope: &mut Scope, ctx: MethodCtx) {
        scope.push();
        self.resolve_stmt(program, stmt, scope, ctx);
        scope.pop();
    }

    /// Resolve the initializer first (a local is not in scope inside its
    /// own initializer), then infer `var` and declare
    fn declare_local(&mut self, program: &mut Program, local: &mut LocalVariable, scope: &mut Scope, ctx: MethodCtx) {
        if let Some(init) = &mut local.initializer {
            self.resolve_expr(program, init, scope, ctx);
        }
        if local.ty.ty.canonical == "var" {
            local.ty.ty = local
                .initializer
                .as_ref()
                .and_then(|init| self.type_of(program, init, ctx))
                .unwrap_or_else(TypeRef::unknown);
        }
        self.declare_variable(program, local, scope, ctx);
    }

    fn declare_variable(&mut self, program: &Program, local: &mut LocalVariable, scope: &mut Scope, ctx: MethodCtx) {
        local.ty.ty = self.qualify_type(program, &local.ty.ty, ctx.file, ctx.class);
        self.local_types.insert(local.id, local.ty.ty.clone());
        scope.declare(&local.name, Declaration::Local(local.id));
    }

    fn resolve_expr(&mut self, program: &mut Program, expr: &mut Expr, scope: &mut Scope, ctx: MethodCtx) {
        let text = expr.text.clone();
        match &mut expr.kind {
            ExprKind::Literal(_) | ExprKind::This { .. } => {}
            ExprKind::Reference(reference) => {
                if let Some(qualifier) = &mut reference.qualifier {
                    self.resolve_expr(program, qualifier, scope, ctx);
                }
                reference.target = self.resolve_reference(
                    program,
                    &reference.name,
                    reference.qualifier.as_deref(),
                    &text,
                    scope,
                    ctx,
                );
            }
            ExprKind::Call(call) => {
                if let Some(qualifier) = &mut call.qualifier {
                    self.resolve_expr(program, qualifier, scope, ctx);
                }
                for arg in &mut call.arguments {
                    self.resolve_expr(program, arg, scope, ctx);
                }
                call.target = self.resolve_call(
                    program,
                    &call.name,
                    call.qualifier.as_deref(),
                    call.arguments.len(),
                    ctx,
                );
            }
            ExprKind::New(new) => {
                new.ty.ty = self.qualify_type(program, &new.ty.ty, ctx.file, ctx.class);
                for arg in &mut new.arguments {
                    self.resolve_expr(program, arg, scope, ctx);
                }
                new.constructor = self.resolve_constructor(program, &new.ty.ty, new.arguments.len());
            }
            ExprKind::Parenthesized(inner) => self.resolve_expr(program, inner, scope, ctx),
            ExprKind::Unary { operand, .. } => self.resolve_expr(program, operand, scope, ctx),
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(program, left, scope, ctx);
                self.resolve_expr(program, right, scope, ctx);
            }
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                self.resolve_expr(program, condition, scope, ctx);
                self.resolve_expr(program, then_expr, scope, ctx);
                self.resolve_expr(program, else_expr, scope, ctx);
            }
            ExprKind::Cast { ty, operand } => {
                ty.ty = self.qualify_type(program, &ty.ty, ctx.file, ctx.class);
                self.resolve_expr(program, operand, scope, ctx);
            }
            ExprKind::Assignment { target, value, .. } => {
                self.resolve_expr(program, target, scope, ctx);
                self.resolve_expr(program, value, scope, ctx);
            }
            ExprKind::ArrayAccess { array, index } => {
                self.resolve_expr(program, array, scope, ctx);
                self.resolve_expr(program, index, scope, ctx);
            }
            ExprKind::NewArray {
                element,
                dimensions,
                initializer,
            } => {
                if let Some(element) = element {
                    element.ty = self.qualify_type(program, &element.ty, ctx.file, ctx.class);
                }
                for e in dimensions.iter_mut().chain(initializer.iter_mut()) {
                    self.resolve_expr(program, e, scope, ctx);
                }
            }
            ExprKind::Lambda { parameters, body } => {
                scope.push();
                for p in parameters {
                    self.declare_variable(program, p, scope, ctx);
                }
                self.resolve_stmt(program, body, scope, ctx);
                scope.pop();
            }
            ExprKind::Other(children) => {
                for e in children {
                    self.resolve_expr(program, e, scope, ctx);
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // References
    // ═══════════════════════════════════════════════════════════════════════

    fn resolve_reference(
        &mut self,
        program: &mut Program,
        name: &str,
        qualifier: Option<&Expr>,
        text: &str,
        scope: &Scope,
        ctx: MethodCtx,
    ) -> Option<Declaration> {
        let Some(qualifier) = qualifier else {
            if let Some(decl) = scope.lookup(name) {
                return Some(decl);
            }
            let mut current = ctx.class;
            while let Some(id) = current {
                if let Some(field) = self.find_field(program, id, name) {
                    return Some(Declaration::Field(field));
                }
                current = program.class(id).and_then(|c| c.outer);
            }
            if !starts_uppercase(name) {
                return None;
            }
            let qualified = self.qualify_simple(program, name, ctx.file, ctx.class)?;
            return self.class_by_name(program, &qualified).map(Declaration::Class);
        };

        match self.receiver_class(program, qualifier, ctx) {
            Some(class) => {
                if let Some(field) = self.find_field(program, class, name) {
                    return Some(Declaration::Field(field));
                }
                let class_name = program.class(class)?.qualified_name.clone();
                if let Some(ty) = jdk::static_field_type(&class_name, name) {
                    return Some(Declaration::Field(self.library_field(program, class, name, ty)));
                }
                let nested = format!("{}.{}", class_name, name);
                self.classes.get(&nested).copied().map(Declaration::Class)
            }
            // `java.lang.reflect.Array`: a dotted package path naming a class
            None if is_name_chain(qualifier) && starts_uppercase(name) => {
                let qualified: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                self.class_by_name(program, &qualified).map(Declaration::Class)
            }
            None => None,
        }
    }

    fn find_field(&self, program: &Program, class: ClassId, name: &str) -> Option<FieldId> {
        let mut current = Some(class);
        let mut hops = 0;
        while let Some(id) = current {
            if let Some(field) = self.fields.get(&id).and_then(|f| f.get(name)) {
                return Some(*field);
            }
            current = self.super_class(program, id);
            hops += 1;
            if hops > 32 {
                break;
            }
        }
        None
    }

    fn super_class(&self, program: &Program, class: ClassId) -> Option<ClassId> {
        let super_name = program.class(class)?.super_class.as_ref()?;
        self.classes.get(super_name).copied()
    }

    /// Class id for a qualified name, creating a library stub class for
    /// qualified names outside the program
    fn class_by_name(&mut self, program: &mut Program, qualified: &str) -> Option<ClassId> {
        if let Some(id) = self.classes.get(qualified) {
            return Some(*id);
        }
        if !qualified.contains('.') {
            return None;
        }
        Some(self.library_class(program, qualified))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Calls
    // ═══════════════════════════════════════════════════════════════════════

    fn resolve_call(
        &mut self,
        program: &mut Program,
        name: &str,
        qualifier: Option<&Expr>,
        arity: usize,
        ctx: MethodCtx,
    ) -> Option<MethodId> {
        let Some(qualifier) = qualifier else {
            let mut current = ctx.class;
            while let Some(id) = current {
                if let Some(method) = self.find_method(program, id, name, arity) {
                    return Some(method);
                }
                current = program.class(id).and_then(|c| c.outer);
            }
            if let Some(method) = self.static_import_method(program, name, arity, ctx) {
                return Some(method);
            }
            return self.object_method(program, name, arity);
        };

        let class = self.receiver_class(program, qualifier, ctx)?;
        self.find_method(program, class, name, arity)
            .or_else(|| self.object_method(program, name, arity))
    }

    /// Method `name/arity` declared on `class` or a superclass; calls that
    /// reach a library class get a stub
    fn find_method(&mut self, program: &mut Program, class: ClassId, name: &str, arity: usize) -> Option<MethodId> {
        let mut current = Some(class);
        let mut hops = 0;
        while let Some(id) = current {
            if let Some(candidates) = self.methods.get(&id).and_then(|m| m.get(name)) {
                let by_arity = candidates
                    .iter()
                    .copied()
                    .find(|m| program.method(*m).is_some_and(|m| accepts_arity(m, arity)));
                if let Some(found) = by_arity.or_else(|| candidates.first().copied()) {
                    return Some(found);
                }
            }
            if self.is_library_class(program, id) {
                return Some(self.library_method(program, id, name, arity));
            }
            // Superclass outside the program: stub on the library class
            if let Some(super_name) = program.class(id).and_then(|c| c.super_class.clone()) {
                if !self.classes.contains_key(&super_name) && super_name.contains('.') {
                    let library = self.library_class(program, &super_name);
                    return Some(self.library_method(program, library, name, arity));
                }
            }
            current = self.super_class(program, id);
            hops += 1;
            if hops > 32 {
                break;
            }
        }
        None
    }

    fn static_import_method(&mut self, program: &mut Program, name: &str, arity: usize, ctx: MethodCtx) -> Option<MethodId> {
        let imports = program.file(ctx.file)?.imports.clone();
        let owner = imports.iter().filter(|i| i.is_static).find_map(|i| {
            if i.on_demand {
                Some(i.path.clone())
            } else {
                let (class, member) = i.path.rsplit_once('.')?;
                (member == name).then(|| class.to_string())
            }
        })?;
        let class = self.class_by_name(program, &owner)?;
        self.find_method(program, class, name, arity)
    }

    fn object_method(&mut self, program: &mut Program, name: &str, arity: usize) -> Option<MethodId> {
        if !jdk::is_object_method(name) {
            return None;
        }
        let object = self.library_class(program, jdk::OBJECT);
        Some(self.library_method(program, object, name, arity))
    }

    fn resolve_constructor(&self, program: &Program, ty: &TypeRef, arity: usize) -> Option<MethodId> {
        let class = *self.classes.get(&ty.canonical)?;
        let class_name = &program.class(class)?.name;
        let candidates = self.methods.get(&class)?.get(class_name)?;
        candidates.iter().copied().find(|m| {
            program
                .method(*m)
                .is_some_and(|m| m.is_constructor() && accepts_arity(m, arity))
        })
    }

    /// Class a qualified member access looks into: the class itself for
    /// static access, the declared type's class otherwise
    fn receiver_class(&mut self, program: &mut Program, qualifier: &Expr, ctx: MethodCtx) -> Option<ClassId> {
        match &qualifier.kind {
            ExprKind::Reference(r) => match r.target {
                Some(Declaration::Class(class)) => return Some(class),
                None => return None,
                _ => {}
            },
            ExprKind::This { is_super: true } => {
                let class = ctx.class?;
                let super_name = program.class(class)?.super_class.clone();
                return match super_name {
                    Some(name) => self.class_by_name(program, &name),
                    None => Some(self.library_class(program, jdk::OBJECT)),
                };
            }
            _ => {}
        }
        let ty = self.type_of(program, qualifier, ctx)?;
        if ty.array_dims > 0 {
            return Some(self.library_class(program, jdk::OBJECT));
        }
        if ty.is_primitive() || ty.is_unknown() {
            return None;
        }
        self.class_by_name(program, &ty.canonical)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Typing
    // ═══════════════════════════════════════════════════════════════════════

    fn type_of(&self, program: &Program, expr: &Expr, ctx: MethodCtx) -> Option<TypeRef> {
        match &expr.kind {
            ExprKind::Literal(kind) => literal_type(*kind),
            ExprKind::This { is_super } => {
                let class = program.class(ctx.class?)?;
                if *is_super {
                    class.super_class.as_ref().map(|s| TypeRef::new(s.clone()))
                } else {
                    Some(class.as_type())
                }
            }
            ExprKind::Reference(reference) => match reference.target {
                Some(Declaration::Local(id)) => self.local_types.get(&id).cloned(),
                Some(Declaration::Parameter { method, index }) => program
                    .method(method)
                    .and_then(|m| m.parameters.get(index))
                    .map(|p| p.ty.ty.clone()),
                Some(Declaration::Field(id)) => program.field(id).map(|f| f.ty.ty.clone()),
                Some(Declaration::Class(id)) => program.class(id).map(|c| c.as_type()),
                Some(Declaration::Method(_)) => None,
                None if reference.name == "length" => {
                    let owner = self.type_of(program, reference.qualifier.as_deref()?, ctx)?;
                    (owner.array_dims > 0).then(|| TypeRef::new("int"))
                }
                None => None,
            },
            ExprKind::Call(call) => program
                .method(call.target?)
                .and_then(|m| m.return_type.as_ref())
                .map(|r| r.ty.clone()),
            ExprKind::New(new) => Some(new.ty.ty.clone()),
            ExprKind::Cast { ty, .. } => Some(ty.ty.clone()),
            ExprKind::Parenthesized(inner) => self.type_of(program, inner, ctx),
            ExprKind::Assignment { target, .. } => self.type_of(program, target, ctx),
            ExprKind::Unary { operator, operand, .. } => {
                if operator == "!" {
                    Some(TypeRef::new("boolean"))
                } else {
                    self.type_of(program, operand, ctx)
                }
            }
            ExprKind::Binary { operator, left, right } => {
                if matches!(
                    operator.as_str(),
                    "==" | "!=" | "<" | ">" | "<=" | ">=" | "&&" | "||"
                ) {
                    return Some(TypeRef::new("boolean"));
                }
                let l = self.type_of(program, left, ctx)?;
                let r = self.type_of(program, right, ctx);
                Some(match r {
                    Some(r) => wider_numeric(l, r),
                    None => l,
                })
            }
            ExprKind::Conditional { then_expr, .. } => self.type_of(program, then_expr, ctx),
            ExprKind::ArrayAccess { array, .. } => {
                let array_ty = self.type_of(program, array, ctx)?;
                (array_ty.array_dims > 0)
                    .then(|| TypeRef::array(array_ty.canonical, array_ty.array_dims - 1))
            }
            ExprKind::NewArray { element, .. } => element.as_ref().map(|e| e.ty.clone()),
            ExprKind::Lambda { .. } | ExprKind::Other(_) => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Library stubs
    // ═══════════════════════════════════════════════════════════════════════

    fn is_library_class(&self, program: &Program, class: ClassId) -> bool {
        program
            .class(class)
            .and_then(|c| program.file(c.file))
            .is_some_and(|f| f.origin == SourceOrigin::Library)
    }

    fn library_file(&mut self, program: &mut Program) -> FileId {
        if let Some(file) = self.library_file {
            return file;
        }
        let file = program.add_file(LIBRARY_STUB_PATH, None, Vec::new(), SourceOrigin::Library);
        self.library_file = Some(file);
        file
    }

    fn library_class(&mut self, program: &mut Program, qualified: &str) -> ClassId {
        if let Some(id) = self.classes.get(qualified) {
            return *id;
        }
        let file = self.library_file(program);
        let name = qualified.rsplit('.').next().unwrap_or(qualified).to_string();
        let id = program.add_class(Class {
            id: ClassId(0),
            name,
            qualified_name: qualified.to_string(),
            kind: ClassKind::Class,
            file,
            outer: None,
            super_class: None,
            modifiers: Modifiers {
                is_public: true,
                ..Modifiers::default()
            },
            methods: Vec::new(),
            fields: Vec::new(),
            nested: Vec::new(),
            is_local: false,
            span: Span::zero(),
        });
        self.classes.insert(qualified.to_string(), id);
        debug!(class = qualified, "created library stub class");
        id
    }

    fn library_method(&mut self, program: &mut Program, class: ClassId, name: &str, arity: usize) -> MethodId {
        if let Some(existing) = self
            .methods
            .get(&class)
            .and_then(|m| m.get(name))
            .and_then(|ids| {
                ids.iter()
                    .copied()
                    .find(|m| program.method(*m).is_some_and(|m| m.parameters.len() == arity))
            })
        {
            return existing;
        }

        let class_name = program
            .class(class)
            .map(|c| c.qualified_name.clone())
            .unwrap_or_default();
        let file = program
            .class(class)
            .map(|c| c.file)
            .unwrap_or_else(|| self.library_file(program));
        let return_type =
            jdk::return_type(&class_name, name).unwrap_or_else(TypeRef::unknown);
        let native = jdk::is_native(&class_name, name);
        let parameters: Vec<Parameter> = (0..arity)
            .map(|i| {
                Parameter::new(
                    format!("arg{}", i),
                    TypeUse::new(TypeRef::unknown(), Span::zero()),
                    Span::zero(),
                )
            })
            .collect();
        let text = format!(
            "public {}{} {}({});",
            if native { "native " } else { "" },
            return_type,
            name,
            parameters
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let id = program.add_method(Method {
            id: MethodId(0),
            name: name.to_string(),
            class: Some(class),
            file,
            parameters,
            return_type: Some(TypeUse::new(return_type, Span::zero())),
            throws: Vec::new(),
            modifiers: Modifiers {
                is_public: true,
                is_native: native,
                ..Modifiers::default()
            },
            annotations: Vec::new(),
            inner_annotations: Vec::new(),
            body: None,
            text,
            span: Span::zero(),
            name_span: Span::zero(),
            has_syntax_errors: false,
        });
        self.methods
            .entry(class)
            .or_default()
            .entry(name.to_string())
            .or_default()
            .push(id);
        id
    }

    fn library_field(&mut self, program: &mut Program, class: ClassId, name: &str, ty: TypeRef) -> FieldId {
        let id = program.add_field(Field {
            id: FieldId(0),
            name: name.to_string(),
            class,
            ty: TypeUse::new(ty, Span::zero()),
            modifiers: Modifiers {
                is_public: true,
                is_static: true,
                is_final: true,
                ..Modifiers::default()
            },
            initializer: None,
            span: Span::zero(),
        });
        self.fields
            .entry(class)
            .or_default()
            .insert(name.to_string(), id);
        id
    }
}

fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// `a.b.c` made only of unresolved simple references
fn is_name_chain(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Reference(r) => {
            r.target.is_none() && r.qualifier.as_deref().map_or(true, is_name_chain)
        }
        _ => false,
    }
}

fn accepts_arity(method: &Method, arity: usize) -> bool {
    let declared = method.parameters.len();
    let varargs = method
        .parameters
        .last()
        .is_some_and(|p| p.ty.ty.array_dims > 0 && method.text.contains("..."));
    declared == arity || (varargs && arity + 1 >= declared)
}

fn literal_type(kind: LiteralKind) -> Option<TypeRef> {
    let name = match kind {
        LiteralKind::Int => "int",
        LiteralKind::Long => "long",
        LiteralKind::Float => "float",
        LiteralKind::Double => "double",
        LiteralKind::Char => "char",
        LiteralKind::Boolean => "boolean",
        LiteralKind::String => "java.lang.String",
        LiteralKind::Null => return None,
    };
    Some(TypeRef::new(name))
}

fn wider_numeric(left: TypeRef, right: TypeRef) -> TypeRef {
    const RANK: [&str; 4] = ["int", "long", "float", "double"];
    if left.canonical == "java.lang.String" || right.canonical == "java.lang.String" {
        return TypeRef::new("java.lang.String");
    }
    let rank = |t: &TypeRef| RANK.iter().position(|r| *r == t.canonical);
    match (rank(&left), rank(&right)) {
        (Some(l), Some(r)) if r > l => right,
        _ => left,
    }
}
