//! Writing generated tests to disk.
//!
//! Existing files are left untouched unless overwrite is requested, which
//! makes repeated runs idempotent.
//!
//! # Examples
//!
//! ```
//! use testgen_files::{WriteOptions, WriteOutcome, write_test};
//! use testgen_core::RenderedTest;
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! let test = RenderedTest {
//!     target_path: temp.path().join("com/example/MainActivityTest.java"),
//!     content: "class MainActivityTest {}".to_string(),
//! };
//!
//! let first = write_test(&test, &WriteOptions::default()).unwrap();
//! assert_eq!(first, WriteOutcome::Created);
//!
//! let second = write_test(&test, &WriteOptions::default()).unwrap();
//! assert_eq!(second, WriteOutcome::SkippedExisting);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod writer;

pub use error::{FilesError, Result};
pub use writer::{WriteOptions, WriteOutcome, write_test};
