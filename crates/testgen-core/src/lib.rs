//! Core types, configuration, and errors for Android test generation.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Domain types (`ComponentCategory`, `ComponentDescriptor`, `RenderedTest`,
//!   `CoverageTotals`)
//! - Error hierarchy with contextual information
//! - Generator configuration loaded from `testgen.toml`
//! - CLI types (`OutputFormat`, `ExitCode`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;

pub use config::{CONFIG_FILE_NAME, GeneratorConfig};
pub use error::{Error, Result};
pub use types::{ComponentCategory, ComponentDescriptor, CoverageTotals, RenderedTest};
