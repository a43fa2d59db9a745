//! Directory and single-file scanning.

use crate::detect::parse_source;
use crate::error::ScanError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use testgen_core::{ComponentDescriptor, GeneratorConfig};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Maximum source file size read by the scanner (4MB).
pub const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Result of scanning a source tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Components found, in file-name order
    pub components: Vec<ComponentDescriptor>,
    /// Number of source files inspected
    pub files_scanned: usize,
    /// Source files that could not be read
    pub files_skipped: Vec<PathBuf>,
}

/// Finds Android components in Java and Kotlin sources.
///
/// # Examples
///
/// ```
/// use testgen_scanner::ComponentScanner;
/// use testgen_core::GeneratorConfig;
/// # use tempfile::TempDir;
///
/// # let temp = TempDir::new().unwrap();
/// let dir = temp.path().join("com/example");
/// std::fs::create_dir_all(&dir).unwrap();
/// std::fs::write(
///     dir.join("SyncService.kt"),
///     "package com.example\nclass SyncService : Service() {}\n",
/// ).unwrap();
///
/// let scanner = ComponentScanner::from_config(&GeneratorConfig::default());
/// let report = scanner.scan_dir(temp.path());
/// assert_eq!(report.components.len(), 1);
/// assert_eq!(report.components[0].qualified_name, "com.example.SyncService");
/// ```
#[derive(Debug, Clone)]
pub struct ComponentScanner {
    extensions: Vec<String>,
}

impl ComponentScanner {
    /// Creates a scanner accepting the given extensions (without leading dot).
    #[must_use]
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Creates a scanner from generator configuration.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.extensions.clone())
    }

    /// Recursively scans `source_root`.
    ///
    /// A missing root yields an empty report. Unreadable files are logged
    /// and listed in [`ScanReport::files_skipped`]; they never abort the scan.
    #[must_use]
    pub fn scan_dir(&self, source_root: &Path) -> ScanReport {
        let mut report = ScanReport::default();

        if !source_root.is_dir() {
            info!(
                "No source directory found at {}. Nothing to scan.",
                source_root.display()
            );
            return report;
        }

        for entry in WalkDir::new(source_root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    if let Some(path) = e.path() {
                        report.files_skipped.push(path.to_path_buf());
                    }
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.accepts(path) {
                continue;
            }

            report.files_scanned += 1;
            match read_source(path) {
                Ok(text) => {
                    let fallback = fallback_package(path, source_root);
                    let found = parse_source(&text, path, &fallback);
                    if !found.is_empty() {
                        debug!("{} component(s) in {}", found.len(), path.display());
                    }
                    report.components.extend(found);
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    report.files_skipped.push(path.to_path_buf());
                }
            }
        }

        report
    }

    /// Scans exactly one file.
    ///
    /// `source_root` is only used to derive a fallback package when the
    /// file lies beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the file is missing, has an unsupported
    /// extension, is too large, or cannot be read.
    pub fn scan_file(
        &self,
        path: &Path,
        source_root: &Path,
    ) -> Result<Vec<ComponentDescriptor>, ScanError> {
        if !path.is_file() {
            return Err(ScanError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        if !self.accepts(path) {
            return Err(ScanError::UnsupportedFile {
                path: path.to_path_buf(),
            });
        }

        let text = read_source(path)?;
        Ok(parse_source(&text, path, &fallback_package(path, source_root)))
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

/// Reads a source file, replacing invalid UTF-8 rather than failing.
fn read_source(path: &Path) -> Result<String, ScanError> {
    let io_err = |source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_FILE_SIZE {
        return Err(ScanError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    let bytes = fs::read(path).map_err(io_err)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Derives a dotted package from the file's directory relative to the root.
fn fallback_package(path: &Path, source_root: &Path) -> String {
    path.strip_prefix(source_root)
        .ok()
        .and_then(Path::parent)
        .map(|dir| {
            dir.components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default()
}
