//! Skip-or-overwrite file writer.

use crate::error::{FilesError, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use testgen_core::RenderedTest;
use tracing::{debug, info};

/// Options for writing generated tests.
///
/// # Examples
///
/// ```
/// use testgen_files::WriteOptions;
///
/// let options = WriteOptions::default().with_overwrite(true);
/// assert!(options.overwrite);
/// assert!(options.atomic);
/// ```
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename)
    pub atomic: bool,
    /// Overwrite existing files
    pub overwrite: bool,
}

impl WriteOptions {
    /// Creates new write options with defaults.
    ///
    /// Defaults:
    /// - atomic: true
    /// - overwrite: false (existing tests are never clobbered silently)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            atomic: true,
            overwrite: false,
        }
    }

    /// Sets whether to use atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Sets whether to overwrite existing files.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened to a single target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// File did not exist and was created
    Created,
    /// File existed and was replaced
    Overwritten,
    /// File existed and overwrite was off
    SkippedExisting,
}

impl WriteOutcome {
    /// Returns `true` if the file on disk was written.
    #[must_use]
    pub const fn is_written(&self) -> bool {
        !matches!(self, Self::SkippedExisting)
    }
}

/// Writes a rendered test, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn write_test(test: &RenderedTest, options: &WriteOptions) -> Result<WriteOutcome> {
    let path = &test.target_path;
    let existed = path.exists();

    if existed && !options.overwrite {
        info!(
            "Skipping {} (already exists). Use --force to overwrite.",
            path.display()
        );
        return Ok(WriteOutcome::SkippedExisting);
    }

    let parent = path.parent().ok_or_else(|| FilesError::InvalidPath {
        path: path.clone(),
    })?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).map_err(|source| FilesError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    if options.atomic {
        write_file_atomic(path, &test.content)?;
    } else {
        fs::write(path, &test.content).map_err(|source| FilesError::Write {
            path: path.clone(),
            source,
        })?;
    }

    if existed {
        info!("Overwrote {}", path.display());
        Ok(WriteOutcome::Overwritten)
    } else {
        info!("Created {}", path.display());
        Ok(WriteOutcome::Created)
    }
}

/// Writes to a sibling temp file, syncs, then renames over the target.
fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path)?;
    write_temp(&temp_path, |file| file.write_all(content.as_bytes()))?;

    if let Err(source) = fs::rename(&temp_path, path) {
        debug!("Rename failed, removing {}", temp_path.display());
        let _ = fs::remove_file(&temp_path);
        return Err(FilesError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Creates `temp_path`, fills it, and syncs it to disk.
///
/// The temp file is removed if filling or syncing fails.
fn write_temp(
    temp_path: &Path,
    fill: impl FnOnce(&mut fs::File) -> io::Result<()>,
) -> Result<()> {
    let write_err = |source| FilesError::Write {
        path: temp_path.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(temp_path).map_err(write_err)?;
    if let Err(source) = fill(&mut file).and_then(|()| file.sync_all()) {
        drop(file);
        debug!("Write failed, removing {}", temp_path.display());
        let _ = fs::remove_file(temp_path);
        return Err(write_err(source));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| FilesError::InvalidPath {
            path: path.to_path_buf(),
        })?
        .to_string_lossy();
    Ok(path.with_file_name(format!(".{file_name}.tmp")))
}
