//! Rendering of component descriptors into test files.
//!
//! The renderer performs no semantic analysis: it picks the category
//! template, fills in names and imports, and mirrors the package onto the
//! test root.
//!
//! # Examples
//!
//! ```
//! use testgen_codegen::TestRenderer;
//! use testgen_core::{ComponentCategory, ComponentDescriptor};
//! use std::path::PathBuf;
//!
//! let renderer = TestRenderer::new("app/src/test/java", "Test").unwrap();
//! let descriptor = ComponentDescriptor::new(
//!     "BootReceiver",
//!     "com.example",
//!     ComponentCategory::BroadcastReceiver,
//!     "app/src/main/java/com/example/BootReceiver.kt",
//! );
//!
//! let test = renderer.render(&descriptor).unwrap();
//! assert_eq!(
//!     test.target_path,
//!     PathBuf::from("app/src/test/java/com/example/BootReceiverTest.java")
//! );
//! assert!(test.content.contains("public class BootReceiverTest"));
//! ```

use crate::template_engine::TemplateEngine;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use testgen_core::{ComponentCategory, ComponentDescriptor, GeneratorConfig, RenderedTest, Result};
use tracing::debug;

/// Extension of generated test files.
pub const TEST_FILE_EXTENSION: &str = "java";

const BASE_IMPORTS: [&str; 6] = [
    "org.junit.Assert",
    "org.junit.Test",
    "org.junit.runner.RunWith",
    "org.mockito.Mock",
    "org.mockito.Mockito",
    "org.mockito.junit.MockitoJUnitRunner",
];

const CONTEXT_IMPORTS: [&str; 3] = [
    "android.content.Context",
    "android.content.Intent",
    "android.util.Log",
];

/// Template variables for a single test class.
#[derive(Debug, Serialize)]
struct TestContext<'a> {
    package: &'a str,
    imports: Vec<String>,
    class_name: &'a str,
    qualified_name: &'a str,
    test_class_name: String,
}

/// Renders test classes for discovered components.
#[derive(Debug)]
pub struct TestRenderer<'a> {
    engine: TemplateEngine<'a>,
    test_root: PathBuf,
    suffix: String,
}

impl TestRenderer<'_> {
    /// Creates a renderer writing under `test_root` with the given class suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to register.
    pub fn new(test_root: impl Into<PathBuf>, suffix: impl Into<String>) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            test_root: test_root.into(),
            suffix: suffix.into(),
        })
    }

    /// Creates a renderer from configuration, resolving the test root
    /// against the project root.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to register.
    pub fn from_config(project_root: &Path, config: &GeneratorConfig) -> Result<Self> {
        Self::new(
            GeneratorConfig::resolve(project_root, &config.test_root),
            config.test_suffix.clone(),
        )
    }

    /// Renders the test for one component.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, descriptor: &ComponentDescriptor) -> Result<RenderedTest> {
        let context = TestContext {
            package: &descriptor.package_path,
            imports: imports_for(descriptor),
            class_name: &descriptor.simple_name,
            qualified_name: &descriptor.qualified_name,
            test_class_name: descriptor.test_class_name(&self.suffix),
        };

        let content = self
            .engine
            .render(template_name(descriptor.category), &context)?;
        let target_path = self.target_path(descriptor);
        debug!(
            "Rendered {} for {}",
            target_path.display(),
            descriptor.qualified_name
        );

        Ok(RenderedTest {
            target_path,
            content,
        })
    }

    /// Returns where the test for `descriptor` is written.
    ///
    /// The package is mirrored under the test root:
    /// `<test_root>/<package dirs>/<Name><suffix>.java`.
    #[must_use]
    pub fn target_path(&self, descriptor: &ComponentDescriptor) -> PathBuf {
        self.test_root
            .join(descriptor.package_dir())
            .join(descriptor.test_class_name(&self.suffix))
            .with_extension(TEST_FILE_EXTENSION)
    }

    /// Returns the test root.
    #[must_use]
    pub fn test_root(&self) -> &Path {
        &self.test_root
    }
}

const fn template_name(category: ComponentCategory) -> &'static str {
    match category {
        ComponentCategory::Activity => "test/activity",
        ComponentCategory::Service => "test/service",
        ComponentCategory::BroadcastReceiver => "test/receiver",
        ComponentCategory::ViewModel => "test/viewmodel",
    }
}

/// Sorted, de-duplicated imports for a component's test class.
fn imports_for(descriptor: &ComponentDescriptor) -> Vec<String> {
    let mut imports: BTreeSet<&str> = BASE_IMPORTS.into_iter().collect();

    if descriptor.category.is_context_bound() {
        imports.extend(CONTEXT_IMPORTS);
    } else {
        imports.insert("androidx.lifecycle.SavedStateHandle");
    }
    imports.insert(descriptor.category.base_class_import());

    // Classes in the default package cannot be imported.
    if !descriptor.package_path.is_empty() {
        imports.insert(descriptor.qualified_name.as_str());
    }

    imports.into_iter().map(str::to_string).collect()
}
