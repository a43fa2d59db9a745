//! Template engine for test generation using Handlebars.
//!
//! Provides a wrapper around Handlebars with the built-in test templates
//! pre-registered, one per component category plus shared partials.
//!
//! # Examples
//!
//! ```
//! use testgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let context = json!({
//!     "package": "com.example",
//!     "imports": ["org.junit.Test"],
//!     "class_name": "MainActivity",
//!     "qualified_name": "com.example.MainActivity",
//!     "test_class_name": "MainActivityTest",
//! });
//! let rendered = engine.render("test/activity", &context).unwrap();
//! assert!(rendered.contains("public class MainActivityTest"));
//! ```

use handlebars::Handlebars;
use serde::Serialize;
use testgen_core::{Error, Result};

/// Built-in templates as `(name, source)` pairs.
const TEST_TEMPLATES: [(&str, &str); 4] = [
    ("test/activity", include_str!("../templates/activity.java.hbs")),
    ("test/service", include_str!("../templates/service.java.hbs")),
    ("test/receiver", include_str!("../templates/receiver.java.hbs")),
    ("test/viewmodel", include_str!("../templates/viewmodel.java.hbs")),
];

/// Shared partials referenced by the test templates.
const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../templates/header.java.hbs")),
    ("lookup_tests", include_str!("../templates/lookup_tests.java.hbs")),
];

/// Template engine for test generation.
///
/// Output is Java source, so HTML escaping is disabled.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_partials(&mut handlebars)?;
        Self::register_test_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_partials(handlebars: &mut Handlebars<'a>) -> Result<()> {
        for (name, source) in PARTIALS {
            handlebars
                .register_partial(name, source)
                .map_err(|e| Error::TemplateError {
                    message: format!("Failed to register partial '{name}': {e}"),
                    source: Some(Box::new(e)),
                })?;
        }
        Ok(())
    }

    fn register_test_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        for (name, source) in TEST_TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    message: format!("Failed to register template '{name}': {e}"),
                    source: Some(Box::new(e)),
                })?;
        }
        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A variable referenced by the template is missing
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Template rendering failed for '{template_name}': {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Registers a custom template, replacing any template of the same name.
    ///
    /// # Errors
    ///
    /// Returns error if template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use testgen_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register_template_string("custom", "// {{name}}").unwrap();
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register template '{name}': {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
