//! Errors raised while scanning source files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning.
///
/// Directory scans downgrade per-file failures to warnings; these errors
/// surface only in single-file mode.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file does not exist or is not a regular file.
    #[error("source file not found: {}", path.display())]
    FileNotFound {
        /// Requested path
        path: PathBuf,
    },

    /// The file extension is not a configured source extension.
    #[error("unsupported source file: {}", path.display())]
    UnsupportedFile {
        /// Requested path
        path: PathBuf,
    },

    /// The file is larger than the scanner accepts.
    #[error("file too large: {} ({size} bytes exceeds {limit} limit)", path.display())]
    FileTooLarge {
        /// Offending path
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Maximum accepted size in bytes
        limit: u64,
    },

    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Returns `true` if the error means "nothing to scan" rather than a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use testgen_scanner::ScanError;
    ///
    /// let err = ScanError::UnsupportedFile { path: "layout.xml".into() };
    /// assert!(err.is_skippable());
    /// ```
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::UnsupportedFile { .. } | Self::FileTooLarge { .. }
        )
    }
}
