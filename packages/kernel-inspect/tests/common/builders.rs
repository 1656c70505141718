//! Test data builders

use kernel_inspect::features::program_model::Method;
use kernel_inspect::{InspectionConfig, InspectionReport, InspectionSession, JavaFrontend, Program, ProgramModel};

/// Builder for a resolved `Program`
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    project: Vec<(String, String)>,
    library: Vec<(String, String)>,
}

impl ProgramBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project compilation unit
    pub fn with_source(mut self, path: &str, source: &str) -> Self {
        self.project.push((path.to_string(), source.to_string()));
        self
    }

    /// Add a library compilation unit (resolvable, never inlined)
    pub fn with_library(mut self, path: &str, source: &str) -> Self {
        self.library.push((path.to_string(), source.to_string()));
        self
    }

    /// Parse everything and resolve names
    pub fn build(self) -> Program {
        let mut frontend = JavaFrontend::new().expect("java grammar loads");
        let mut program = Program::new();
        for (path, source) in &self.project {
            frontend
                .add_project_source(&mut program, path.as_str(), source)
                .expect("project source parses");
        }
        for (path, source) in &self.library {
            frontend
                .add_library_source(&mut program, path.as_str(), source)
                .expect("library source parses");
        }
        frontend.resolve(&mut program);
        program
    }
}

/// Program made of one project file
pub fn program_of(source: &str) -> Program {
    ProgramBuilder::new().with_source("Kernels.java", source).build()
}

/// Method `name` of class `class`, panicking with a useful message
pub fn method<'p>(program: &'p Program, class: &str, name: &str) -> &'p Method {
    program
        .find_method(class, name)
        .unwrap_or_else(|| panic!("method {}.{} not found", class, name))
}

/// Inspect the first file of `program` with `config`
pub fn inspect_with(program: &Program, config: InspectionConfig) -> InspectionReport {
    let session = InspectionSession::new(config);
    session.inspect_file(program, program.files()[0])
}

/// Inspect the first file of `program` with the default configuration
pub fn inspect(program: &Program) -> InspectionReport {
    inspect_with(program, InspectionConfig::default())
}
