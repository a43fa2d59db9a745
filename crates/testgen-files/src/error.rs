//! Error types for test file writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing generated tests.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Parent directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory being created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File could not be written or moved into place.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Target has no parent directory or file name.
    #[error("invalid target path: {}", path.display())]
    InvalidPath {
        /// Offending path
        path: PathBuf,
    },
}

impl FilesError {
    /// Returns the path the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } | Self::InvalidPath { path } => {
                path
            }
        }
    }
}

/// Result type for file writing operations.
pub type Result<T> = std::result::Result<T, FilesError>;
