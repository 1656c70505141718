//! Tree-sitter Java syntax tree → program arena
//!
//! Extraction is purely syntactic: type names are kept as written and every
//! reference/call target is left unresolved for the resolution pass.

use tree_sitter::Node as TSNode;

use crate::features::program_model::{
    Annotation, CallExpr, CatchClause, Class, ClassKind, Expr, ExprKind, Field, Import,
    LiteralKind, LocalVariable, Method, Modifiers, NewExpr, Parameter, Program, ReferenceExpr,
    ProgramModel, Stmt, StmtKind, TryStmt, TypeRef, TypeUse,
};
use crate::shared::models::{ClassId, FieldId, FileId, MethodId, Span};

/// Tree-sitter node → Span (1-based lines, 0-based columns)
pub trait SpanExt {
    fn to_span(&self) -> Span;
}

impl SpanExt for TSNode<'_> {
    fn to_span(&self) -> Span {
        Span::new(
            self.start_position().row as u32 + 1,
            self.start_position().column as u32,
            self.end_position().row as u32 + 1,
            self.end_position().column as u32,
        )
    }
}

fn is_comment(node: &TSNode) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

fn named_children<'t>(node: &TSNode<'t>) -> Vec<TSNode<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !is_comment(c))
        .collect()
}

fn all_children<'t>(node: &TSNode<'t>) -> Vec<TSNode<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn field_children<'t>(node: &TSNode<'t>, field: &str) -> Vec<TSNode<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor)
        .filter(|c| !is_comment(c))
        .collect()
}

fn child_of_kind<'t>(node: &TSNode<'t>, kind: &str) -> Option<TSNode<'t>> {
    all_children(node).into_iter().find(|c| c.kind() == kind)
}

/// Parse written type text into an erased `TypeRef`
///
/// Drops type annotations and generic arguments; `[]` pairs and a varargs
/// ellipsis each count as one array dimension.
pub fn type_ref_from_text(text: &str) -> TypeRef {
    let mut name = String::with_capacity(text.len());
    let mut generic_depth = 0usize;
    let mut dims = 0u32;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' => generic_depth += 1,
            '>' => generic_depth = generic_depth.saturating_sub(1),
            _ if generic_depth > 0 => {}
            '@' => {
                while chars
                    .peek()
                    .is_some_and(|n| n.is_alphanumeric() || *n == '_' || *n == '.')
                {
                    chars.next();
                }
            }
            '[' => dims += 1,
            ']' => {}
            '.' if chars.peek() == Some(&'.') => {
                chars.next();
                chars.next();
                dims += 1;
            }
            c if c.is_whitespace() => {}
            c => name.push(c),
        }
    }

    if name.is_empty() {
        TypeRef::unknown()
    } else {
        TypeRef::array(name, dims)
    }
}

fn count_dims(node: Option<TSNode>, source: &str) -> u32 {
    node.map(|n| source[n.byte_range()].matches('[').count() as u32)
        .unwrap_or(0)
}

/// Package, imports and classes of one compilation unit
pub struct FileHeader {
    pub package: Option<String>,
    pub imports: Vec<Import>,
}

pub struct Extractor<'s> {
    source: &'s str,
    file: FileId,
}

impl<'s> Extractor<'s> {
    pub fn new(source: &'s str, file: FileId) -> Self {
        Self { source, file }
    }

    fn text(&self, node: &TSNode) -> &'s str {
        &self.source[node.byte_range()]
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Compilation unit
    // ═══════════════════════════════════════════════════════════════════════

    pub fn header(source: &str, root: &TSNode) -> FileHeader {
        let mut package = None;
        let mut imports = Vec::new();

        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    package = named_children(&child)
                        .into_iter()
                        .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
                        .map(|n| source[n.byte_range()].to_string());
                }
                "import_declaration" => {
                    let children = all_children(&child);
                    let path = children
                        .iter()
                        .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
                        .map(|n| source[n.byte_range()].to_string());
                    if let Some(path) = path {
                        imports.push(Import {
                            path,
                            is_static: children.iter().any(|n| n.kind() == "static"),
                            on_demand: children.iter().any(|n| n.kind() == "asterisk"),
                        });
                    }
                }
                _ => {}
            }
        }

        FileHeader { package, imports }
    }

    pub fn extract_types(&self, program: &mut Program, root: &TSNode, package: Option<&str>) {
        let prefix = package.unwrap_or("").to_string();
        for child in named_children(root) {
            if is_type_declaration(child.kind()) {
                self.extract_class(program, &child, None, &prefix, false);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Declarations
    // ═══════════════════════════════════════════════════════════════════════

    fn extract_class(
        &self,
        program: &mut Program,
        node: &TSNode,
        outer: Option<ClassId>,
        prefix: &str,
        is_local: bool,
    ) -> ClassId {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_string())
            .unwrap_or_default();
        let qualified_name = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };

        let kind = match node.kind() {
            "interface_declaration" => ClassKind::Interface,
            "enum_declaration" => ClassKind::Enum,
            "record_declaration" => ClassKind::Record,
            "annotation_type_declaration" => ClassKind::Annotation,
            _ => ClassKind::Class,
        };

        let (modifiers, _) = self.modifiers(node);
        let super_class = node
            .child_by_field_name("superclass")
            .and_then(|s| named_children(&s).into_iter().next())
            .map(|t| type_ref_from_text(self.text(&t)).canonical);

        let class_id = program.add_class(Class {
            id: ClassId(0),
            name,
            qualified_name: qualified_name.clone(),
            kind,
            file: self.file,
            outer,
            super_class,
            modifiers,
            methods: Vec::new(),
            fields: Vec::new(),
            nested: Vec::new(),
            is_local,
            span: node.to_span(),
        });

        // Record components become private final fields
        if let Some(params) = node.child_by_field_name("parameters") {
            for param in named_children(&params) {
                if param.kind() == "formal_parameter" {
                    let parameter = self.parameter(&param);
                    program.add_field(Field {
                        id: FieldId(0),
                        name: parameter.name,
                        class: class_id,
                        ty: parameter.ty,
                        modifiers: Modifiers {
                            is_private: true,
                            is_final: true,
                            ..Modifiers::default()
                        },
                        initializer: None,
                        span: parameter.span,
                    });
                }
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            self.extract_members(program, &body, class_id, &qualified_name);
        }

        class_id
    }

    fn extract_members(
        &self,
        program: &mut Program,
        body: &TSNode,
        class_id: ClassId,
        qualified_name: &str,
    ) {
        for member in named_children(body) {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    self.extract_fields(program, &member, class_id);
                }
                "method_declaration" | "constructor_declaration" => {
                    self.extract_method(program, &member, class_id);
                }
                // Enum constants are followed by ordinary member declarations
                "enum_body_declarations" => {
                    self.extract_members(program, &member, class_id, qualified_name);
                }
                kind if is_type_declaration(kind) => {
                    self.extract_class(program, &member, Some(class_id), qualified_name, false);
                }
                _ => {}
            }
        }
    }

    fn extract_fields(&self, program: &mut Program, node: &TSNode, class_id: ClassId) {
        let (modifiers, _) = self.modifiers(node);
        let base = node
            .child_by_field_name("type")
            .map(|t| type_ref_from_text(self.text(&t)))
            .unwrap_or_else(TypeRef::unknown);
        let type_span = node
            .child_by_field_name("type")
            .map(|t| t.to_span())
            .unwrap_or_default();

        for declarator in field_children(node, "declarator") {
            let name = declarator
                .child_by_field_name("name")
                .map(|n| self.text(&n).to_string())
                .unwrap_or_default();
            let extra = count_dims(declarator.child_by_field_name("dimensions"), self.source);
            let initializer = declarator
                .child_by_field_name("value")
                .map(|v| self.expr(program, &v, class_id));
            program.add_field(Field {
                id: FieldId(0),
                name,
                class: class_id,
                ty: TypeUse::new(
                    TypeRef::array(base.canonical.clone(), base.array_dims + extra),
                    type_span,
                ),
                modifiers,
                initializer,
                span: declarator.to_span(),
            });
        }
    }

    fn extract_method(&self, program: &mut Program, node: &TSNode, class_id: ClassId) -> MethodId {
        let (modifiers, annotations) = self.modifiers(node);
        let name_node = node.child_by_field_name("name");
        let name = name_node
            .map(|n| self.text(&n).to_string())
            .unwrap_or_default();

        let return_type = if node.kind() == "constructor_declaration" {
            None
        } else {
            node.child_by_field_name("type").map(|t| {
                let mut ty = type_ref_from_text(self.text(&t));
                ty.array_dims += count_dims(node.child_by_field_name("dimensions"), self.source);
                TypeUse::new(ty, t.to_span())
            })
        };

        let parameters = node
            .child_by_field_name("parameters")
            .map(|params| {
                named_children(&params)
                    .into_iter()
                    .filter(|p| matches!(p.kind(), "formal_parameter" | "spread_parameter"))
                    .map(|p| self.parameter(&p))
                    .collect()
            })
            .unwrap_or_default();

        let throws = child_of_kind(node, "throws")
            .map(|t| {
                named_children(&t)
                    .into_iter()
                    .map(|ty| self.type_use(&ty))
                    .collect()
            })
            .unwrap_or_default();

        let body = node
            .child_by_field_name("body")
            .map(|b| self.stmt(program, &b, class_id));
        let inner_annotations = self.inner_annotations(node);

        program.add_method(Method {
            id: MethodId(0),
            name,
            class: Some(class_id),
            file: self.file,
            parameters,
            return_type,
            throws,
            modifiers,
            annotations,
            inner_annotations,
            body,
            text: self.text(node).to_string(),
            span: node.to_span(),
            name_span: name_node.map(|n| n.to_span()).unwrap_or_else(|| node.to_span()),
            has_syntax_errors: node.has_error(),
        })
    }

    fn parameter(&self, node: &TSNode) -> Parameter {
        let (ty, name) = if node.kind() == "spread_parameter" {
            // (modifiers)? type '...' variable_declarator
            let children = named_children(node);
            let ty = children
                .iter()
                .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))
                .map(|t| {
                    let mut use_ = self.type_use(t);
                    use_.ty.array_dims += 1;
                    use_
                })
                .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), node.to_span()));
            let name = children
                .iter()
                .find(|c| c.kind() == "variable_declarator")
                .and_then(|d| d.child_by_field_name("name"))
                .map(|n| self.text(&n).to_string())
                .unwrap_or_default();
            (ty, name)
        } else {
            let mut ty = node
                .child_by_field_name("type")
                .map(|t| self.type_use(&t))
                .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), node.to_span()));
            ty.ty.array_dims += count_dims(node.child_by_field_name("dimensions"), self.source);
            let name = node
                .child_by_field_name("name")
                .map(|n| self.text(&n).to_string())
                .unwrap_or_default();
            (ty, name)
        };
        Parameter::new(name, ty, node.to_span())
    }

    fn type_use(&self, node: &TSNode) -> TypeUse {
        TypeUse::new(type_ref_from_text(self.text(node)), node.to_span())
    }

    fn modifiers(&self, node: &TSNode) -> (Modifiers, Vec<Annotation>) {
        let mut modifiers = Modifiers::default();
        let mut annotations = Vec::new();
        if let Some(mods) = child_of_kind(node, "modifiers") {
            for child in all_children(&mods) {
                match child.kind() {
                    "marker_annotation" | "annotation" => {
                        if let Some(name) = child.child_by_field_name("name") {
                            annotations.push(Annotation {
                                qualified_name: self.text(&name).to_string(),
                                span: child.to_span(),
                            });
                        }
                    }
                    keyword => modifiers.set_keyword(keyword),
                }
            }
        }
        (modifiers, annotations)
    }

    /// Annotations below the parameter list and body, outside nested class
    /// bodies, in source order
    fn inner_annotations(&self, method: &TSNode) -> Vec<Annotation> {
        let mut found = Vec::new();
        let mut stack: Vec<TSNode> = ["parameters", "body"]
            .iter()
            .filter_map(|field| method.child_by_field_name(field))
            .collect();
        while let Some(node) = stack.pop() {
            match node.kind() {
                "marker_annotation" | "annotation" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        found.push(Annotation {
                            qualified_name: self.text(&name).to_string(),
                            span: node.to_span(),
                        });
                    }
                }
                "class_body" => {}
                _ => stack.extend(all_children(&node)),
            }
        }
        found.sort_by_key(|a| a.span);
        found
    }

    fn local_variables(
        &self,
        program: &mut Program,
        node: &TSNode,
        class_id: ClassId,
    ) -> Vec<LocalVariable> {
        let type_node = node.child_by_field_name("type");
        let base = type_node
            .map(|t| self.type_use(&t))
            .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), node.to_span()));

        field_children(node, "declarator")
            .into_iter()
            .map(|declarator| {
                let name = declarator
                    .child_by_field_name("name")
                    .map(|n| self.text(&n).to_string())
                    .unwrap_or_default();
                let mut ty = TypeUse::new(base.ty.clone(), base.span);
                ty.ty.array_dims +=
                    count_dims(declarator.child_by_field_name("dimensions"), self.source);
                let initializer = declarator
                    .child_by_field_name("value")
                    .map(|v| self.expr(program, &v, class_id));
                LocalVariable::new(name, ty, initializer, declarator.to_span())
            })
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn stmt(&self, program: &mut Program, node: &TSNode, class_id: ClassId) -> Stmt {
        let span = node.to_span();
        let kind = match node.kind() {
            "block" | "constructor_body" => StmtKind::Block(
                named_children(node)
                    .iter()
                    .map(|s| self.stmt(program, s, class_id))
                    .collect(),
            ),
            "expression_statement" => match named_children(node).first() {
                Some(e) => StmtKind::Expression(self.expr(program, e, class_id)),
                None => return Stmt::empty(span),
            },
            "local_variable_declaration" => {
                StmtKind::LocalDecl(self.local_variables(program, node, class_id))
            }
            "if_statement" => {
                let condition = self.required_expr(program, node, "condition", class_id);
                let then_branch = self.required_stmt(program, node, "consequence", class_id);
                let else_branch = node
                    .child_by_field_name("alternative")
                    .map(|a| Box::new(self.stmt(program, &a, class_id)));
                StmtKind::If {
                    condition,
                    then_branch: Box::new(then_branch),
                    else_branch,
                }
            }
            "while_statement" | "do_statement" => StmtKind::Loop {
                init: Vec::new(),
                condition: node
                    .child_by_field_name("condition")
                    .map(|c| self.expr(program, &c, class_id)),
                update: Vec::new(),
                body: Box::new(self.required_stmt(program, node, "body", class_id)),
            },
            "for_statement" => {
                let init = field_children(node, "init")
                    .iter()
                    .map(|i| {
                        if i.kind() == "local_variable_declaration" {
                            self.stmt(program, i, class_id)
                        } else {
                            Stmt::new(
                                StmtKind::Expression(self.expr(program, i, class_id)),
                                i.to_span(),
                            )
                        }
                    })
                    .collect();
                let condition = node
                    .child_by_field_name("condition")
                    .map(|c| self.expr(program, &c, class_id));
                let update = field_children(node, "update")
                    .iter()
                    .map(|u| self.expr(program, u, class_id))
                    .collect();
                StmtKind::Loop {
                    init,
                    condition,
                    update,
                    body: Box::new(self.required_stmt(program, node, "body", class_id)),
                }
            }
            "enhanced_for_statement" => {
                let mut ty = node
                    .child_by_field_name("type")
                    .map(|t| self.type_use(&t))
                    .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), span));
                ty.ty.array_dims +=
                    count_dims(node.child_by_field_name("dimensions"), self.source);
                let name_node = node.child_by_field_name("name");
                let variable = LocalVariable::new(
                    name_node.map(|n| self.text(&n)).unwrap_or_default(),
                    ty,
                    None,
                    name_node.map(|n| n.to_span()).unwrap_or(span),
                );
                StmtKind::ForEach {
                    variable,
                    iterable: self.required_expr(program, node, "value", class_id),
                    body: Box::new(self.required_stmt(program, node, "body", class_id)),
                }
            }
            "return_statement" => StmtKind::Return(
                named_children(node)
                    .first()
                    .map(|e| self.expr(program, e, class_id)),
            ),
            "throw_statement" => match named_children(node).first() {
                Some(e) => StmtKind::Throw(self.expr(program, e, class_id)),
                None => return Stmt::empty(span),
            },
            "try_statement" | "try_with_resources_statement" => {
                StmtKind::Try(self.try_stmt(program, node, class_id))
            }
            "assert_statement" => {
                let children = named_children(node);
                match children.first() {
                    Some(c) => StmtKind::Assert {
                        condition: self.expr(program, c, class_id),
                        message: children.get(1).map(|m| self.expr(program, m, class_id)),
                    },
                    None => return Stmt::empty(span),
                }
            }
            kind if is_type_declaration(kind) => {
                let prefix = program
                    .class(class_id)
                    .map(|c| c.qualified_name.clone())
                    .unwrap_or_default();
                StmtKind::LocalClass(self.extract_class(program, node, Some(class_id), &prefix, true))
            }
            "explicit_constructor_invocation" => StmtKind::Other {
                statements: Vec::new(),
                expressions: node
                    .child_by_field_name("arguments")
                    .map(|args| self.arguments(program, &args, class_id))
                    .unwrap_or_default(),
            },
            "switch_expression" => {
                let expressions = node
                    .child_by_field_name("condition")
                    .map(|c| vec![self.expr(program, &c, class_id)])
                    .unwrap_or_default();
                StmtKind::Other {
                    statements: self.switch_statements(program, node, class_id),
                    expressions,
                }
            }
            "synchronized_statement" | "labeled_statement" => StmtKind::Other {
                statements: named_children(node)
                    .iter()
                    .filter(|c| is_statement_kind(c.kind()))
                    .map(|c| self.stmt(program, c, class_id))
                    .collect(),
                expressions: named_children(node)
                    .iter()
                    .filter(|c| c.kind() == "parenthesized_expression")
                    .map(|c| self.expr(program, c, class_id))
                    .collect(),
            },
            "ERROR" | "break_statement" | "continue_statement" | ";" => return Stmt::empty(span),
            _ => StmtKind::Other {
                statements: Vec::new(),
                expressions: named_children(node)
                    .iter()
                    .map(|c| self.expr(program, c, class_id))
                    .collect(),
            },
        };
        Stmt::new(kind, span)
    }

    fn required_stmt(&self, program: &mut Program, node: &TSNode, field: &str, class_id: ClassId) -> Stmt {
        node.child_by_field_name(field)
            .map(|n| self.stmt(program, &n, class_id))
            .unwrap_or_else(|| Stmt::empty(node.to_span()))
    }

    fn switch_statements(&self, program: &mut Program, node: &TSNode, class_id: ClassId) -> Vec<Stmt> {
        let mut statements = Vec::new();
        let Some(body) = node.child_by_field_name("body") else {
            return statements;
        };
        for group in named_children(&body) {
            for child in named_children(&group) {
                if child.kind() == "switch_label" {
                    continue;
                }
                if is_statement_kind(child.kind()) {
                    statements.push(self.stmt(program, &child, class_id));
                } else {
                    let expr = self.expr(program, &child, class_id);
                    statements.push(Stmt::new(StmtKind::Expression(expr), child.to_span()));
                }
            }
        }
        statements
    }

    fn try_stmt(&self, program: &mut Program, node: &TSNode, class_id: ClassId) -> TryStmt {
        let resources = node
            .child_by_field_name("resources")
            .map(|spec| {
                named_children(&spec)
                    .iter()
                    .map(|resource| {
                        if resource.child_by_field_name("type").is_some() {
                            let ty = resource
                                .child_by_field_name("type")
                                .map(|t| self.type_use(&t))
                                .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), resource.to_span()));
                            let name = resource
                                .child_by_field_name("name")
                                .map(|n| self.text(&n))
                                .unwrap_or_default();
                            let value = resource
                                .child_by_field_name("value")
                                .map(|v| self.expr(program, &v, class_id));
                            Stmt::new(
                                StmtKind::LocalDecl(vec![LocalVariable::new(
                                    name,
                                    ty,
                                    value,
                                    resource.to_span(),
                                )]),
                                resource.to_span(),
                            )
                        } else {
                            let inner = named_children(resource)
                                .first()
                                .map(|e| self.expr(program, e, class_id))
                                .unwrap_or_else(|| self.expr(program, resource, class_id));
                            Stmt::new(StmtKind::Expression(inner), resource.to_span())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let body = self.required_stmt(program, node, "body", class_id);

        let mut catches = Vec::new();
        let mut finally = None;
        for child in named_children(node) {
            match child.kind() {
                "catch_clause" => {
                    let Some(param) = child_of_kind(&child, "catch_formal_parameter") else {
                        continue;
                    };
                    let ty = child_of_kind(&param, "catch_type")
                        .and_then(|ct| named_children(&ct).into_iter().next())
                        .map(|t| self.type_use(&t))
                        .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), param.to_span()));
                    let name = param
                        .child_by_field_name("name")
                        .map(|n| self.text(&n))
                        .unwrap_or_default();
                    catches.push(CatchClause {
                        parameter: LocalVariable::new(name, ty, None, param.to_span()),
                        body: self.required_stmt(program, &child, "body", class_id),
                    });
                }
                "finally_clause" => {
                    finally = named_children(&child)
                        .first()
                        .map(|b| Box::new(self.stmt(program, b, class_id)));
                }
                _ => {}
            }
        }

        TryStmt {
            resources,
            body: Box::new(body),
            catches,
            finally,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    fn expr(&self, program: &mut Program, node: &TSNode, class_id: ClassId) -> Expr {
        let span = node.to_span();
        let text = self.text(node);
        let kind = match node.kind() {
            "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
            | "binary_integer_literal" => ExprKind::Literal(if text.ends_with(|c| c == 'l' || c == 'L') {
                LiteralKind::Long
            } else {
                LiteralKind::Int
            }),
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                ExprKind::Literal(if text.ends_with(|c| c == 'f' || c == 'F') {
                    LiteralKind::Float
                } else {
                    LiteralKind::Double
                })
            }
            "true" | "false" => ExprKind::Literal(LiteralKind::Boolean),
            "character_literal" => ExprKind::Literal(LiteralKind::Char),
            "string_literal" | "text_block" => ExprKind::Literal(LiteralKind::String),
            "null_literal" => ExprKind::Literal(LiteralKind::Null),
            "this" => ExprKind::This { is_super: false },
            "super" => ExprKind::This { is_super: true },
            "identifier" | "type_identifier" => ExprKind::Reference(ReferenceExpr {
                name: text.to_string(),
                qualifier: None,
                target: None,
            }),
            "field_access" | "scoped_identifier" | "scoped_type_identifier" => {
                let (object, field) = match node.kind() {
                    "field_access" => (
                        node.child_by_field_name("object"),
                        node.child_by_field_name("field"),
                    ),
                    _ => {
                        let children = named_children(node);
                        (children.first().copied(), children.last().copied())
                    }
                };
                ExprKind::Reference(ReferenceExpr {
                    name: field.map(|f| self.text(&f).to_string()).unwrap_or_default(),
                    qualifier: object.map(|o| Box::new(self.expr(program, &o, class_id))),
                    target: None,
                })
            }
            "method_invocation" => ExprKind::Call(CallExpr {
                name: node
                    .child_by_field_name("name")
                    .map(|n| self.text(&n).to_string())
                    .unwrap_or_default(),
                qualifier: node
                    .child_by_field_name("object")
                    .map(|o| Box::new(self.expr(program, &o, class_id))),
                arguments: node
                    .child_by_field_name("arguments")
                    .map(|a| self.arguments(program, &a, class_id))
                    .unwrap_or_default(),
                target: None,
            }),
            "object_creation_expression" => ExprKind::New(NewExpr {
                ty: node
                    .child_by_field_name("type")
                    .map(|t| self.type_use(&t))
                    .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), span)),
                arguments: node
                    .child_by_field_name("arguments")
                    .map(|a| self.arguments(program, &a, class_id))
                    .unwrap_or_default(),
                constructor: None,
            }),
            "parenthesized_expression" => match named_children(node).first() {
                Some(inner) => {
                    ExprKind::Parenthesized(Box::new(self.expr(program, inner, class_id)))
                }
                None => ExprKind::Other(Vec::new()),
            },
            "unary_expression" => ExprKind::Unary {
                operator: self.field_text(node, "operator"),
                operand: Box::new(self.required_expr(program, node, "operand", class_id)),
                prefix: true,
            },
            "update_expression" => {
                let children = all_children(node);
                let prefix = children
                    .first()
                    .is_some_and(|c| matches!(c.kind(), "++" | "--"));
                let operator = children
                    .iter()
                    .find(|c| matches!(c.kind(), "++" | "--"))
                    .map(|c| c.kind().to_string())
                    .unwrap_or_default();
                match named_children(node).first() {
                    Some(operand) => ExprKind::Unary {
                        operator,
                        operand: Box::new(self.expr(program, operand, class_id)),
                        prefix,
                    },
                    None => ExprKind::Other(Vec::new()),
                }
            }
            "binary_expression" => ExprKind::Binary {
                operator: self.field_text(node, "operator"),
                left: Box::new(self.required_expr(program, node, "left", class_id)),
                right: Box::new(self.required_expr(program, node, "right", class_id)),
            },
            "ternary_expression" => ExprKind::Conditional {
                condition: Box::new(self.required_expr(program, node, "condition", class_id)),
                then_expr: Box::new(self.required_expr(program, node, "consequence", class_id)),
                else_expr: Box::new(self.required_expr(program, node, "alternative", class_id)),
            },
            "cast_expression" => ExprKind::Cast {
                ty: node
                    .child_by_field_name("type")
                    .map(|t| self.type_use(&t))
                    .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), span)),
                operand: Box::new(self.required_expr(program, node, "value", class_id)),
            },
            "assignment_expression" => ExprKind::Assignment {
                operator: self.field_text(node, "operator"),
                target: Box::new(self.required_expr(program, node, "left", class_id)),
                value: Box::new(self.required_expr(program, node, "right", class_id)),
            },
            "array_access" => ExprKind::ArrayAccess {
                array: Box::new(self.required_expr(program, node, "array", class_id)),
                index: Box::new(self.required_expr(program, node, "index", class_id)),
            },
            "array_creation_expression" => {
                let dimension_nodes = field_children(node, "dimensions");
                let mut element = node
                    .child_by_field_name("type")
                    .map(|t| self.type_use(&t))
                    .unwrap_or_else(|| TypeUse::new(TypeRef::unknown(), span));
                element.ty.array_dims = dimension_nodes
                    .iter()
                    .map(|d| self.text(d).matches('[').count() as u32)
                    .sum();
                let dimensions = dimension_nodes
                    .iter()
                    .filter(|d| d.kind() == "dimensions_expr")
                    .filter_map(|d| named_children(d).into_iter().next())
                    .map(|e| self.expr(program, &e, class_id))
                    .collect();
                let initializer = node
                    .child_by_field_name("value")
                    .map(|v| self.arguments(program, &v, class_id))
                    .unwrap_or_default();
                ExprKind::NewArray {
                    element: Some(element),
                    dimensions,
                    initializer,
                }
            }
            "array_initializer" => ExprKind::NewArray {
                element: None,
                dimensions: Vec::new(),
                initializer: self.arguments(program, node, class_id),
            },
            "lambda_expression" => {
                let parameters = node
                    .child_by_field_name("parameters")
                    .map(|p| self.lambda_parameters(&p))
                    .unwrap_or_default();
                let body = match node.child_by_field_name("body") {
                    Some(b) if b.kind() == "block" => self.stmt(program, &b, class_id),
                    Some(b) => Stmt::new(
                        StmtKind::Expression(self.expr(program, &b, class_id)),
                        b.to_span(),
                    ),
                    None => Stmt::empty(span),
                };
                ExprKind::Lambda {
                    parameters,
                    body: Box::new(body),
                }
            }
            _ => ExprKind::Other(
                named_children(node)
                    .iter()
                    .map(|c| self.expr(program, c, class_id))
                    .collect(),
            ),
        };
        Expr::new(kind, span, text)
    }

    fn required_expr(&self, program: &mut Program, node: &TSNode, field: &str, class_id: ClassId) -> Expr {
        match node.child_by_field_name(field) {
            Some(n) => self.expr(program, &n, class_id),
            None => Expr::new(ExprKind::Other(Vec::new()), node.to_span(), ""),
        }
    }

    fn arguments(&self, program: &mut Program, node: &TSNode, class_id: ClassId) -> Vec<Expr> {
        named_children(node)
            .iter()
            .map(|a| self.expr(program, a, class_id))
            .collect()
    }

    fn field_text(&self, node: &TSNode, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.text(&n).to_string())
            .unwrap_or_default()
    }

    fn lambda_parameters(&self, node: &TSNode) -> Vec<LocalVariable> {
        let inferred = |n: &TSNode| {
            LocalVariable::new(
                self.text(n),
                TypeUse::new(TypeRef::unknown(), n.to_span()),
                None,
                n.to_span(),
            )
        };
        match node.kind() {
            "identifier" => vec![inferred(node)],
            "inferred_parameters" => named_children(node).iter().map(inferred).collect(),
            _ => named_children(node)
                .iter()
                .filter(|p| matches!(p.kind(), "formal_parameter" | "spread_parameter"))
                .map(|p| {
                    let param = self.parameter(p);
                    LocalVariable::new(param.name, param.ty, None, param.span)
                })
                .collect(),
        }
    }
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration"
    )
}

fn is_statement_kind(kind: &str) -> bool {
    kind.ends_with("_statement")
        || matches!(
            kind,
            "block" | "local_variable_declaration" | "switch_expression" | "class_declaration"
        )
}
