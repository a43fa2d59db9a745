//! Error types for JaCoCo integration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the build-file patcher and the coverage summarizer.
#[derive(Error, Debug)]
pub enum JacocoError {
    /// Build file to patch does not exist.
    #[error("build file not found: {}", path.display())]
    BuildFileNotFound {
        /// Expected build file location
        path: PathBuf,
    },

    /// Coverage report does not exist.
    #[error("coverage report not found: {}", path.display())]
    ReportNotFound {
        /// Expected report location
        path: PathBuf,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The report is not well-formed XML.
    #[error("malformed coverage report at byte {position}: {source}")]
    Xml {
        /// Byte offset where parsing stopped
        position: String,
        /// Underlying parser error
        #[source]
        source: quick_xml::Error,
    },

    /// The report parsed but its structure is unusable.
    #[error("malformed coverage report: {message}")]
    Malformed {
        /// Description of the problem
        message: String,
    },

    /// A counter attribute is not a non-negative integer.
    #[error("invalid counter attribute {attribute}=\"{value}\"")]
    InvalidCounter {
        /// Attribute name (`covered` or `missed`)
        attribute: String,
        /// Raw attribute value
        value: String,
    },

    /// Unknown JaCoCo counter type name.
    #[error("unknown counter type '{0}' (expected one of INSTRUCTION, BRANCH, LINE, COMPLEXITY, METHOD, CLASS)")]
    UnknownCounterType(String),
}

impl JacocoError {
    /// Returns `true` if the error comes from report content rather than I/O.
    ///
    /// # Examples
    ///
    /// ```
    /// use testgen_jacoco::JacocoError;
    ///
    /// let err = JacocoError::Malformed { message: "no root".to_string() };
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Xml { .. } | Self::Malformed { .. } | Self::InvalidCounter { .. }
        )
    }

    /// Returns `true` if a required input file is missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BuildFileNotFound { .. } | Self::ReportNotFound { .. }
        )
    }
}
