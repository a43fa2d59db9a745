//! Gradle build-file patching.

use crate::error::JacocoError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Block appended to the build file to enable JaCoCo XML and HTML reports.
pub const JACOCO_SNIPPET: &str = r#"// Added by android-testgen
apply plugin: 'jacoco'

jacoco {
    toolVersion = "0.8.10"
}

tasks.withType(Test) {
    finalizedBy jacocoTestReport
}

jacocoTestReport {
    dependsOn test
    reports {
        xml.required = true
        csv.required = false
        html.required = true
    }
}
"#;

/// Result of [`ensure_jacoco`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    /// The snippet was appended
    Patched,
    /// JaCoCo was already configured; the file was not touched
    AlreadyPresent,
}

/// Returns `true` if the build script already configures JaCoCo reports.
#[must_use]
pub fn has_jacoco(content: &str) -> bool {
    content.contains("jacocoTestReport") && content.contains("jacoco")
}

/// Returns the patched build script, or `None` if no change is needed.
///
/// # Examples
///
/// ```
/// use testgen_jacoco::patch_content;
///
/// let patched = patch_content("android {}\n\n\n").unwrap();
/// assert!(patched.starts_with("android {}\n\n// Added by android-testgen"));
///
/// // Applying the patch again is a no-op.
/// assert!(patch_content(&patched).is_none());
/// ```
#[must_use]
pub fn patch_content(content: &str) -> Option<String> {
    if has_jacoco(content) {
        return None;
    }

    let trimmed = content.trim_end();
    if trimmed.is_empty() {
        Some(JACOCO_SNIPPET.to_string())
    } else {
        Some(format!("{trimmed}\n\n{JACOCO_SNIPPET}"))
    }
}

/// Appends the JaCoCo block to `build_file` unless already configured.
///
/// # Errors
///
/// Returns [`JacocoError::BuildFileNotFound`] if the file does not exist,
/// or [`JacocoError::Io`] if it cannot be read or written.
pub fn ensure_jacoco(build_file: &Path) -> Result<PatchOutcome, JacocoError> {
    if !build_file.is_file() {
        return Err(JacocoError::BuildFileNotFound {
            path: build_file.to_path_buf(),
        });
    }

    let io_err = |source| JacocoError::Io {
        path: build_file.to_path_buf(),
        source,
    };

    let content = fs::read_to_string(build_file).map_err(io_err)?;
    let Some(updated) = patch_content(&content) else {
        info!("JaCoCo configuration already detected in {}", build_file.display());
        return Ok(PatchOutcome::AlreadyPresent);
    };

    fs::write(build_file, updated).map_err(io_err)?;
    info!("Appended JaCoCo configuration to {}", build_file.display());
    Ok(PatchOutcome::Patched)
}
