//! In-memory program arena
//!
//! Owns every file, class, method and field of a parsed program. All edits go
//! through `&mut self` and bump the modification count, so caches keyed on
//! it never observe a stale tree.

use std::path::PathBuf;
use tracing::debug;

use crate::errors::{InspectError, Result};
use crate::features::program_model::domain::{
    Class, Field, Import, Method, SourceFile, SourceOrigin, Stmt,
};
use crate::features::program_model::ports::ProgramModel;
use crate::shared::models::{ClassId, FieldId, FileId, MethodId};

#[derive(Debug, Default)]
pub struct Program {
    files: Vec<SourceFile>,
    classes: Vec<Class>,
    /// Removed methods leave a `None` slot so ids stay stable
    methods: Vec<Option<Method>>,
    fields: Vec<Field>,
    modification_count: u64,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        package: Option<String>,
        imports: Vec<Import>,
        origin: SourceOrigin,
    ) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile {
            id,
            path: path.into(),
            package,
            imports,
            classes: Vec::new(),
            origin,
        });
        self.bump();
        id
    }

    /// Register a class; its `id` is assigned here and it is linked into its
    /// outer class or file
    pub fn add_class(&mut self, mut class: Class) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        class.id = id;
        match class.outer {
            Some(outer) => {
                if let Some(outer) = self.classes.get_mut(outer.index()) {
                    outer.nested.push(id);
                }
            }
            None => {
                if let Some(file) = self.files.get_mut(class.file.index()) {
                    file.classes.push(id);
                }
            }
        }
        self.classes.push(class);
        self.bump();
        id
    }

    pub fn add_field(&mut self, mut field: Field) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        field.id = id;
        if let Some(class) = self.classes.get_mut(field.class.index()) {
            class.fields.push(id);
        }
        self.fields.push(field);
        self.bump();
        id
    }

    /// Register a method; its `id` is assigned here
    pub fn add_method(&mut self, mut method: Method) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        method.id = id;
        if let Some(class) = method.class.and_then(|c| self.classes.get_mut(c.index())) {
            class.methods.push(id);
        }
        self.methods.push(Some(method));
        self.bump();
        id
    }

    pub(crate) fn class_mut(&mut self, id: ClassId) -> Option<&mut Class> {
        self.classes.get_mut(id.index())
    }

    pub(crate) fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(id.index())
    }

    pub(crate) fn method_mut(&mut self, id: MethodId) -> Option<&mut Method> {
        self.methods.get_mut(id.index()).and_then(Option::as_mut)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edits
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace a method body; `body_source` is the new body as written
    /// (`{ ... }`) and is ignored when `body` is `None`
    ///
    /// The declaration text is rebuilt from the old header and the new
    /// body, so registry keys follow the edit.
    pub fn replace_method_body(
        &mut self,
        id: MethodId,
        body: Option<Stmt>,
        body_source: &str,
    ) -> Result<()> {
        let method = self
            .method_mut(id)
            .ok_or_else(|| InspectError::analysis(format!("unknown method {}", id)))?;
        let header = declaration_header(&method.text).trim_end();
        method.text = match body {
            Some(_) => format!("{} {}", header, body_source.trim()),
            None => format!("{};", header),
        };
        method.body = body;
        self.bump();
        Ok(())
    }

    pub fn remove_method(&mut self, id: MethodId) -> Option<Method> {
        let removed = self.methods.get_mut(id.index()).and_then(Option::take)?;
        if let Some(class) = removed.class.and_then(|c| self.classes.get_mut(c.index())) {
            class.methods.retain(|m| *m != id);
        }
        self.bump();
        Some(removed)
    }

    /// Rename a method, rewriting the name in its declaration text as well
    pub fn rename_method(&mut self, id: MethodId, new_name: &str) -> Result<()> {
        let method = self
            .method_mut(id)
            .ok_or_else(|| InspectError::analysis(format!("unknown method {}", id)))?;
        let old_call = format!("{}(", method.name);
        method.text = method
            .text
            .replacen(&old_call, &format!("{}(", new_name), 1);
        method.name = new_name.to_string();
        self.bump();
        Ok(())
    }

    /// Record an edit that changed nothing the arena tracks (whitespace,
    /// comments, reformatting)
    pub fn touch(&mut self) {
        self.bump();
    }

    fn bump(&mut self) {
        self.modification_count += 1;
        debug!(revision = self.modification_count, "program modified");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lookup helpers
    // ═══════════════════════════════════════════════════════════════════════

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.iter()
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().flatten()
    }

    pub fn find_class(&self, qualified_name: &str) -> Option<&Class> {
        self.classes
            .iter()
            .find(|c| c.qualified_name == qualified_name)
    }

    /// First method named `name` declared in class `class_qualified_name`
    pub fn find_method(&self, class_qualified_name: &str, name: &str) -> Option<&Method> {
        let class = self.find_class(class_qualified_name)?;
        class
            .methods
            .iter()
            .filter_map(|id| self.method(*id))
            .find(|m| m.name == name)
    }

    pub fn file_by_path(&self, path: &std::path::Path) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

impl ProgramModel for Program {
    fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.index())
    }

    fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(id.index()).and_then(Option::as_ref)
    }

    fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.index())
    }

    fn files(&self) -> Vec<FileId> {
        self.files.iter().map(|f| f.id).collect()
    }

    fn methods_in_file(&self, file: FileId) -> Vec<MethodId> {
        self.methods()
            .filter(|m| m.file == file)
            .map(|m| m.id)
            .collect()
    }

    fn modification_count(&self) -> u64 {
        self.modification_count
    }
}

/// Declaration text before the body (or before the closing `;`)
///
/// The body opens at the first `{` outside parentheses, string and char
/// literals, and comments; annotation element arrays such as `@A({1, 2})`
/// sit inside parentheses.
fn declaration_header(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut parens = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b'{' | b';' if parens == 0 => return &text[..i],
            _ => {}
        }
        i += 1;
    }
    text
}
