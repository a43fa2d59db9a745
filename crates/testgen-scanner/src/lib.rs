//! Android component discovery.
//!
//! Walks a source tree and classifies Java and Kotlin classes into the four
//! supported component categories using textual heuristics. No parsing
//! beyond regular expressions is performed, so unusual formatting can
//! defeat detection.
//!
//! # Examples
//!
//! ```
//! use testgen_scanner::parse_source;
//! use testgen_core::ComponentCategory;
//! use std::path::Path;
//!
//! let source = r#"
//! package com.example.app;
//!
//! public class MainActivity extends AppCompatActivity {}
//! "#;
//!
//! let found = parse_source(source, Path::new("MainActivity.java"), "");
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].qualified_name, "com.example.app.MainActivity");
//! assert_eq!(found[0].category, ComponentCategory::Activity);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod detect;
mod error;
mod scanner;

pub use detect::{parse_source, strip_comments};
pub use error::ScanError;
pub use scanner::{ComponentScanner, MAX_FILE_SIZE, ScanReport};
