//! android-testgen CLI library.
//!
//! Exposes the run pipeline and output formatters so they can be driven
//! from integration tests as well as from the binary.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

pub mod commands;
pub mod formatters;

pub use commands::{RunOptions, RunReport, exit_code_for, run};
