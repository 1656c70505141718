//! Kernel Inspect CLI
//!
//! # Usage
//!
//! ```bash
//! # Diagnose every kernel under src/, resolving calls into lib/ sources
//! kernel-inspect check src/ --library lib/
//!
//! # Machine-readable output with a custom configuration
//! kernel-inspect check src/ --config inspect.yaml --format json
//!
//! # List runnable kernels and their local-memory parameters
//! kernel-inspect tasks src/
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use kernel_inspect::features::program_model::SourceFile;
use kernel_inspect::{
    InspectionConfig, InspectionReport, InspectionSession, JavaFrontend, Preset, Program,
    ProgramModel, SourceOrigin,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "kernel-inspect")]
#[command(about = "Static eligibility checks for TornadoVM kernels", long_about = None)]
struct Cli {
    /// YAML configuration file (version 1 schema)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Preset used when no configuration file is given
    #[arg(long, global = true)]
    preset: Option<Preset>,

    /// Worker threads for kernel fan-out (default: logical CPUs)
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose kernels in Java sources
    Check {
        /// Files or directories to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Directory of library sources used only for call resolution
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List runnable kernels
    Tasks {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Directory of library sources used only for call resolution
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns `false` when an error-severity violation was found
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref(), cli.preset)?;

    let jobs = cli.jobs.unwrap_or_else(num_cpus::get).max(1);
    rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global()?;

    match cli.command {
        Commands::Check {
            paths,
            library,
            format,
        } => {
            let program = build_program(&paths, library.as_deref())?;
            let session = InspectionSession::new(config);
            let reports = session.inspect_program(&program);
            print_reports(&program, &reports, format)?;
            Ok(!reports.iter().any(InspectionReport::has_errors))
        }
        Commands::Tasks {
            paths,
            library,
            format,
        } => {
            let program = build_program(&paths, library.as_deref())?;
            let session = InspectionSession::new(config);
            let mut tasks = Vec::new();
            for file in project_files(&program) {
                for task in session.runnable_tasks(&program, file.id) {
                    tasks.push((file.path.clone(), task));
                }
            }
            match format {
                OutputFormat::Json => {
                    let entries: Vec<serde_json::Value> = tasks
                        .iter()
                        .map(|(path, task)| {
                            serde_json::json!({
                                "file": path,
                                "task": task,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                }
                OutputFormat::Text => {
                    for (path, task) in &tasks {
                        let params: Vec<&str> =
                            task.local_memory_parameters.iter().map(String::as_str).collect();
                        println!(
                            "{}:{}: {}  local-memory: [{}]",
                            path.display(),
                            task.span.start_line,
                            task.display_name,
                            params.join(", ")
                        );
                    }
                }
            }
            Ok(true)
        }
    }
}

fn load_config(
    path: Option<&Path>,
    preset: Option<Preset>,
) -> Result<InspectionConfig, Box<dyn std::error::Error>> {
    let config = match (path, preset) {
        (Some(path), _) => InspectionConfig::from_yaml(path)?,
        (None, Some(preset)) => InspectionConfig::preset(preset),
        (None, None) => InspectionConfig::default(),
    };
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// Source discovery
// ═══════════════════════════════════════════════════════════════════════════

fn java_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "java"))
        .collect()
}

fn build_program(paths: &[PathBuf], library: Option<&Path>) -> Result<Program, Box<dyn std::error::Error>> {
    let mut frontend = JavaFrontend::new()?;
    let mut program = Program::new();

    let mut add = |path: &Path, origin: SourceOrigin, program: &mut Program| {
        match std::fs::read_to_string(path) {
            Ok(source) => {
                if let Err(e) = frontend.parse(program, path, &source, origin) {
                    warn!(file = %path.display(), error = %e, "skipping file");
                }
            }
            Err(e) => warn!(file = %path.display(), error = %e, "skipping file"),
        }
    };

    for root in paths {
        for path in java_files(root) {
            add(&path, SourceOrigin::Project, &mut program);
        }
    }
    if let Some(library) = library {
        for path in java_files(library) {
            add(&path, SourceOrigin::Library, &mut program);
        }
    }

    frontend.resolve(&mut program);
    info!(files = program.files().len(), "program model ready");
    Ok(program)
}

fn project_files(program: &Program) -> Vec<&SourceFile> {
    program
        .files()
        .into_iter()
        .filter_map(|id| program.file(id))
        .filter(|file| file.origin == SourceOrigin::Project)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════

fn print_reports(
    program: &Program,
    reports: &[InspectionReport],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => {
            let mut total = 0;
            for report in reports {
                for violation in &report.violations {
                    // Helper findings may live in another file than the kernel
                    let path = program
                        .method(violation.method)
                        .and_then(|m| program.file(m.file))
                        .map(|f| f.path.as_path())
                        .unwrap_or(report.path.as_path());
                    println!(
                        "{}:{}:{}: {}[{}]: {}",
                        path.display(),
                        violation.span.start_line,
                        violation.span.start_col,
                        violation.severity,
                        violation.rule,
                        violation.message
                    );
                }
                total += report.violations.len();
            }
            let errors: usize = reports.iter().map(InspectionReport::errors).sum();
            println!("{} files, {} problems ({} errors)", reports.len(), total, errors);
        }
    }
    Ok(())
}
