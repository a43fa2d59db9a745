//! Command implementations for the android-testgen CLI.
//!
//! A run always scans and writes tests, then optionally patches the build
//! file and summarizes a coverage report. Each stage lives in its own
//! module and contributes one section of the [`RunReport`].

pub mod completions;
pub mod coverage;
pub mod generate;
pub mod jacoco;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use testgen_core::GeneratorConfig;
use testgen_core::cli::ExitCode;
use testgen_files::FilesError;
use testgen_jacoco::{CounterType, JacocoError};
use testgen_scanner::ScanError;
use tracing::{debug, info};

/// Resolved command-line options for one run.
///
/// Relative paths are interpreted against `project_root`. `None` means
/// "use the configuration file value, or the built-in default".
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Base directory for every relative path
    pub project_root: PathBuf,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Scan root override
    pub source_root: Option<PathBuf>,
    /// Single-file mode
    pub source_file: Option<PathBuf>,
    /// Test output root override
    pub test_root: Option<PathBuf>,
    /// Build file override
    pub build_file: Option<PathBuf>,
    /// Overwrite existing tests
    pub force: bool,
    /// Patch the build file with JaCoCo reporting
    pub jacoco: bool,
    /// JaCoCo XML report to summarize
    pub coverage_report: Option<PathBuf>,
    /// Counter type to summarize
    pub counter: CounterType,
}

/// Everything a run did, printed in the selected output format.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Project root as given
    pub project_root: String,
    /// Scan and write results
    pub generation: generate::GenerationReport,
    /// Build-file patch result, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jacoco: Option<jacoco::JacocoReport>,
    /// Coverage summary, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<coverage::CoverageReport>,
}

/// Runs the full pipeline.
///
/// # Errors
///
/// Returns an error if the project root does not exist, the configuration
/// is invalid, a test cannot be rendered or written, the build file is
/// missing when `--jacoco` is set, or the coverage report is missing or
/// malformed.
pub fn run(options: &RunOptions) -> Result<RunReport> {
    let project_root = options.project_root.as_path();
    if !project_root.is_dir() {
        return Err(testgen_core::Error::ResourceNotFound {
            resource: format!("project root {}", project_root.display()),
        })
        .context("cannot run without a project root");
    }

    let config = load_config(options)?;
    debug!("Effective configuration: {config:?}");

    let source_file = options
        .source_file
        .as_deref()
        .map(|path| GeneratorConfig::resolve(project_root, path));
    let generation = generate::run(project_root, &config, source_file.as_deref(), options.force)?;

    let jacoco = if options.jacoco {
        let build_file = GeneratorConfig::resolve(project_root, &config.build_file);
        Some(jacoco::run(project_root, &build_file)?)
    } else {
        None
    };

    let coverage = match &options.coverage_report {
        Some(report) => {
            let report = GeneratorConfig::resolve(project_root, report);
            Some(coverage::run(project_root, &report, options.counter)?)
        }
        None => None,
    };

    info!(
        "Run complete: {} created, {} overwritten, {} skipped",
        generation.created.len(),
        generation.overwritten.len(),
        generation.skipped.len()
    );

    Ok(RunReport {
        project_root: project_root.display().to_string(),
        generation,
        jacoco,
        coverage,
    })
}

/// Loads configuration and applies command-line overrides.
///
/// Precedence: flag, then config file, then built-in default.
fn load_config(options: &RunOptions) -> Result<GeneratorConfig> {
    let project_root = options.project_root.as_path();
    let mut config = match &options.config {
        Some(path) => {
            let path = GeneratorConfig::resolve(project_root, path);
            GeneratorConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => GeneratorConfig::discover(project_root).context("failed to load config")?,
    };

    if let Some(source_root) = &options.source_root {
        config.source_root.clone_from(source_root);
    }
    if let Some(test_root) = &options.test_root {
        config.test_root.clone_from(test_root);
    }
    if let Some(build_file) = &options.build_file {
        config.build_file.clone_from(build_file);
    }
    Ok(config)
}

/// Maps an error chain to the process exit code.
///
/// The first library error found in the chain decides; anything else is a
/// general error.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<testgen_core::Error>() {
            return ExitCode::from(e);
        }
        if let Some(e) = cause.downcast_ref::<JacocoError>() {
            return match e {
                JacocoError::Io { .. } => ExitCode::IO_ERROR,
                JacocoError::BuildFileNotFound { .. } | JacocoError::UnknownCounterType(_) => {
                    ExitCode::INVALID_INPUT
                }
                JacocoError::ReportNotFound { .. }
                | JacocoError::Xml { .. }
                | JacocoError::Malformed { .. }
                | JacocoError::InvalidCounter { .. } => ExitCode::PARSE_ERROR,
            };
        }
        if let Some(e) = cause.downcast_ref::<ScanError>() {
            return if e.is_skippable() {
                ExitCode::INVALID_INPUT
            } else {
                ExitCode::IO_ERROR
            };
        }
        if cause.downcast_ref::<FilesError>().is_some()
            || cause.downcast_ref::<std::io::Error>().is_some()
        {
            return ExitCode::IO_ERROR;
        }
    }
    ExitCode::ERROR
}

/// Shows `path` relative to the project root when it lies beneath it.
pub(crate) fn display_path(project_root: &Path, path: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}
