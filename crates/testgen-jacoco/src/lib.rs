//! JaCoCo support: Gradle build-file patching and coverage summaries.
//!
//! # Examples
//!
//! ```
//! use testgen_jacoco::{CounterType, summarize_xml};
//!
//! let xml = r#"<report name="app">
//!   <counter type="INSTRUCTION" missed="20" covered="80"/>
//! </report>"#;
//!
//! let summary = summarize_xml(xml, CounterType::Instruction).unwrap();
//! assert_eq!(summary.totals.covered, 80);
//! assert_eq!(summary.percentage(), Some(80.0));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod coverage;
mod error;
mod patcher;

pub use coverage::{CounterType, CoverageSummary, summarize_report, summarize_xml};
pub use error::JacocoError;
pub use patcher::{JACOCO_SNIPPET, PatchOutcome, ensure_jacoco, has_jacoco, patch_content};
