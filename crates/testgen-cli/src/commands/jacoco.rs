//! Build-file patch command.

use super::display_path;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use testgen_jacoco::{PatchOutcome, ensure_jacoco};

/// Result of patching the build file.
#[derive(Debug, Serialize)]
pub struct JacocoReport {
    /// Build file that was inspected
    pub build_file: String,
    /// Whether the file was changed
    pub outcome: PatchOutcome,
}

/// Ensures `build_file` configures JaCoCo reports.
///
/// # Errors
///
/// Returns an error if the build file is missing or cannot be rewritten.
pub fn run(project_root: &Path, build_file: &Path) -> Result<JacocoReport> {
    let outcome = ensure_jacoco(build_file).with_context(|| {
        format!(
            "cannot enable JaCoCo reporting in {}",
            build_file.display()
        )
    })?;

    Ok(JacocoReport {
        build_file: display_path(project_root, build_file),
        outcome,
    })
}
