//! Generator configuration.
//!
//! Settings come from an optional `testgen.toml` at the project root. Every
//! key is optional; missing keys fall back to the layout of a standard
//! single-module Android project.
//!
//! ```toml
//! source_root = "app/src/main/java"
//! test_root = "app/src/test/java"
//! build_file = "app/build.gradle"
//! test_suffix = "Test"
//! extensions = ["java", "kt"]
//! ```
//!
//! # Examples
//!
//! ```
//! use testgen_core::GeneratorConfig;
//! use std::path::PathBuf;
//!
//! let config = GeneratorConfig::from_toml_str("test_suffix = \"UnitTest\"").unwrap();
//! assert_eq!(config.test_suffix, "UnitTest");
//! assert_eq!(config.source_root, PathBuf::from("app/src/main/java"));
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the project root when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = "testgen.toml";

/// Paths and naming used by the scanner, renderer, and patcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory scanned for components, relative to the project root
    pub source_root: PathBuf,
    /// Directory receiving generated tests, relative to the project root
    pub test_root: PathBuf,
    /// Gradle build file patched by `--jacoco`, relative to the project root
    pub build_file: PathBuf,
    /// Suffix appended to the component name to form the test class name
    pub test_suffix: String,
    /// Source file extensions, without the leading dot
    pub extensions: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("app/src/main/java"),
            test_root: PathBuf::from("app/src/test/java"),
            build_file: PathBuf::from("app/build.gradle"),
            test_suffix: "Test".to_string(),
            extensions: vec!["java".to_string(), "kt".to_string()],
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the document is not valid TOML,
    /// contains unknown keys, or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse config: {e}"),
        })?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if the file does not exist, or
    /// [`Error::ConfigError`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ResourceNotFound {
                resource: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Loads `testgen.toml` from the project root, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn discover(project_root: &Path) -> Result<Self> {
        let candidate = project_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!("No {CONFIG_FILE_NAME} in {}, using defaults", project_root.display());
            Ok(Self::default())
        }
    }

    /// Resolves a configured path against the project root.
    ///
    /// Absolute paths are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use testgen_core::GeneratorConfig;
    /// use std::path::{Path, PathBuf};
    ///
    /// let resolved = GeneratorConfig::resolve(Path::new("/proj"), Path::new("app/build.gradle"));
    /// assert_eq!(resolved, PathBuf::from("/proj/app/build.gradle"));
    /// ```
    #[must_use]
    pub fn resolve(project_root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        }
    }

    /// Returns `true` if the path has one of the configured extensions.
    #[must_use]
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    fn normalize(&mut self) {
        for ext in &mut self.extensions {
            *ext = ext.trim_start_matches('.').to_string();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.test_suffix.is_empty()
            || !self
                .test_suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::ConfigError {
                message: format!(
                    "test_suffix must be a non-empty identifier, got '{}'",
                    self.test_suffix
                ),
            });
        }

        if self.extensions.is_empty() || self.extensions.iter().any(String::is_empty) {
            return Err(Error::ConfigError {
                message: "extensions must list at least one non-empty extension".to_string(),
            });
        }

        Ok(())
    }
}
