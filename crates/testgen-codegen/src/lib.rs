//! Test skeleton generation for Android components.
//!
//! Turns [`ComponentDescriptor`](testgen_core::ComponentDescriptor)s into
//! JUnit 4 test classes using Handlebars templates, one template per
//! component category.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod renderer;
pub mod template_engine;

pub use renderer::TestRenderer;
pub use template_engine::TemplateEngine;
