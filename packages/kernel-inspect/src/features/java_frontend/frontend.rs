//! tree-sitter Java front end
//!
//! Parses compilation units into the program arena, then resolves names
//! across everything that has been added.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tree_sitter::Parser;

use super::extract::Extractor;
use super::resolve::Resolver;
use crate::errors::{InspectError, Result};
use crate::features::program_model::{Program, SourceOrigin};
use crate::shared::models::FileId;

pub struct JavaFrontend {
    parser: Parser,
}

impl JavaFrontend {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|e| InspectError::parse_error(format!("Failed to set language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse one compilation unit into `program`
    ///
    /// Syntax errors do not fail the parse; the affected methods are
    /// flagged with `has_syntax_errors` instead.
    pub fn parse(
        &mut self,
        program: &mut Program,
        path: impl Into<PathBuf>,
        source: &str,
        origin: SourceOrigin,
    ) -> Result<FileId> {
        let path = path.into();
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| InspectError::parse_error(format!("Failed to parse {}", path.display())))?;
        let root = tree.root_node();
        if root.has_error() {
            warn!(file = %path.display(), "source contains syntax errors");
        }

        let header = Extractor::header(source, &root);
        let package = header.package.clone();
        let file = program.add_file(path.clone(), header.package, header.imports, origin);
        Extractor::new(source, file).extract_types(program, &root, package.as_deref());

        debug!(file = %path.display(), ?origin, "parsed compilation unit");
        Ok(file)
    }

    pub fn add_project_source(&mut self, program: &mut Program, path: impl Into<PathBuf>, source: &str) -> Result<FileId> {
        self.parse(program, path, source, SourceOrigin::Project)
    }

    pub fn add_library_source(&mut self, program: &mut Program, path: impl Into<PathBuf>, source: &str) -> Result<FileId> {
        self.parse(program, path, source, SourceOrigin::Library)
    }

    /// Resolve types, references and calls across every parsed file
    pub fn resolve(&self, program: &mut Program) {
        Resolver::resolve_program(program);
    }

    /// Parse `sources` as project files and resolve the result
    pub fn parse_program<P: AsRef<Path>>(&mut self, sources: &[(P, &str)]) -> Result<Program> {
        let mut program = Program::new();
        for (path, source) in sources {
            self.add_project_source(&mut program, path.as_ref(), source)?;
        }
        self.resolve(&mut program);
        info!(files = sources.len(), "built program model");
        Ok(program)
    }
}
