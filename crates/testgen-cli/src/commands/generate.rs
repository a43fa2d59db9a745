//! Generate command implementation.
//!
//! Scans the source tree (or a single file), renders one test per
//! component, and writes it to the mirrored path under the test root.

use super::display_path;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use testgen_codegen::TestRenderer;
use testgen_core::{ComponentDescriptor, GeneratorConfig};
use testgen_files::{WriteOptions, WriteOutcome, write_test};
use testgen_scanner::{ComponentScanner, ScanError, ScanReport};
use tracing::{info, warn};

/// Result of the scan and write stages.
#[derive(Debug, Default, Serialize)]
pub struct GenerationReport {
    /// Directory or file that was scanned
    pub scanned: String,
    /// Number of source files read
    pub files_scanned: usize,
    /// Source files that could not be read
    pub files_skipped: Vec<String>,
    /// Number of components discovered
    pub components: usize,
    /// Tests written to new files
    pub created: Vec<String>,
    /// Tests that replaced existing files
    pub overwritten: Vec<String>,
    /// Tests left untouched because they already existed
    pub skipped: Vec<String>,
}

impl GenerationReport {
    /// Returns `true` if any file on disk was written.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.created.is_empty() || !self.overwritten.is_empty()
    }
}

/// Runs the scan, render, and write stages.
///
/// A single file that is missing, unsupported, too large, or unreadable is
/// logged and yields an empty report; directory mode treats a missing root
/// the same way.
///
/// # Errors
///
/// Returns an error if a template fails to render or a test cannot be
/// written.
pub fn run(
    project_root: &Path,
    config: &GeneratorConfig,
    source_file: Option<&Path>,
    force: bool,
) -> Result<GenerationReport> {
    let scanner = ComponentScanner::from_config(config);
    let source_root = GeneratorConfig::resolve(project_root, &config.source_root);

    let (scanned, scan) = match source_file {
        Some(path) => (path, scan_single(&scanner, path, &source_root)),
        None => (source_root.as_path(), scanner.scan_dir(&source_root)),
    };

    let mut report = GenerationReport {
        scanned: display_path(project_root, scanned),
        files_scanned: scan.files_scanned,
        files_skipped: scan
            .files_skipped
            .iter()
            .map(|path| display_path(project_root, path))
            .collect(),
        components: scan.components.len(),
        ..GenerationReport::default()
    };

    if scan.components.is_empty() {
        info!("No Android components detected in {}", scanned.display());
        return Ok(report);
    }
    info!(
        "Discovered {} Android component(s) in {}",
        scan.components.len(),
        scanned.display()
    );

    let renderer = TestRenderer::from_config(project_root, config)
        .context("failed to initialize test templates")?;
    let options = WriteOptions::default().with_overwrite(force);

    for descriptor in &scan.components {
        let outcome = write_one(&renderer, descriptor, &options)?;
        let target = display_path(project_root, &renderer.target_path(descriptor));
        match outcome {
            WriteOutcome::Created => report.created.push(target),
            WriteOutcome::Overwritten => report.overwritten.push(target),
            WriteOutcome::SkippedExisting => report.skipped.push(target),
        }
    }

    Ok(report)
}

fn scan_single(scanner: &ComponentScanner, path: &Path, source_root: &Path) -> ScanReport {
    match scanner.scan_file(path, source_root) {
        Ok(components) => ScanReport {
            components,
            files_scanned: 1,
            files_skipped: Vec::new(),
        },
        Err(e) => skipped_file(path, &e),
    }
}

/// Empty report for a single file that could not be scanned.
///
/// Missing and unsupported files are not counted; unreadable and oversized
/// ones are listed as skipped.
fn skipped_file(path: &Path, err: &ScanError) -> ScanReport {
    warn!("{err}; nothing to generate");
    match err {
        ScanError::FileNotFound { .. } | ScanError::UnsupportedFile { .. } => ScanReport::default(),
        ScanError::FileTooLarge { .. } | ScanError::Io { .. } => ScanReport {
            components: Vec::new(),
            files_scanned: 1,
            files_skipped: vec![path.to_path_buf()],
        },
    }
}

fn write_one(
    renderer: &TestRenderer<'_>,
    descriptor: &ComponentDescriptor,
    options: &WriteOptions,
) -> Result<WriteOutcome> {
    let rendered = renderer
        .render(descriptor)
        .with_context(|| format!("failed to render test for {}", descriptor.qualified_name))?;
    let outcome = write_test(&rendered, options)
        .with_context(|| format!("failed to write {}", rendered.target_path.display()))?;
    Ok(outcome)
}
