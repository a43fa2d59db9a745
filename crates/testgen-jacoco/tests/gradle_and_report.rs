//! Build-file patching and report summaries against files on disk.

use std::fs;
use tempfile::TempDir;
use testgen_jacoco::{CounterType, JacocoError, PatchOutcome, ensure_jacoco, summarize_report};

const KOTLIN_DSL_LIKE: &str = "plugins {\n    id 'com.android.application'\n}\n\nandroid {\n    compileSdk 34\n}\n\n\n";

#[test]
fn test_patch_preserves_original_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("build.gradle");
    fs::write(&path, KOTLIN_DSL_LIKE).unwrap();

    assert_eq!(ensure_jacoco(&path).unwrap(), PatchOutcome::Patched);

    let patched = fs::read_to_string(&path).unwrap();
    assert!(patched.starts_with(KOTLIN_DSL_LIKE.trim_end()));
    assert!(patched.contains("apply plugin: 'jacoco'"));
    assert!(patched.contains("finalizedBy jacocoTestReport"));
    assert!(patched.contains("xml.required = true"));
    assert!(patched.contains("html.required = true"));
    assert!(!patched.contains("}\n\n\n\n"));
}

#[test]
fn test_summarize_report_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("jacocoTestReport.xml");
    fs::write(
        &path,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<!DOCTYPE report PUBLIC "-//JACOCO//DTD Report 1.1//EN" "report.dtd">
<report name="app">
  <sessioninfo id="ci-1" start="1" dump="2"/>
  <group name="debug">
    <counter type="INSTRUCTION" missed="500" covered="500"/>
  </group>
  <counter type="INSTRUCTION" missed="20" covered="80"/>
  <counter type="METHOD" missed="1" covered="3"/>
</report>
"#,
    )
    .unwrap();

    let summary = summarize_report(&path, CounterType::Instruction).unwrap();
    assert_eq!((summary.totals.covered, summary.totals.missed), (80, 20));
    assert_eq!(summary.percentage(), Some(80.0));

    let methods = summarize_report(&path, CounterType::Method).unwrap();
    assert_eq!(methods.percentage(), Some(75.0));

    let classes = summarize_report(&path, CounterType::Class).unwrap();
    assert!(!classes.has_data());
}

#[test]
fn test_missing_report() {
    let temp = TempDir::new().unwrap();
    let err = summarize_report(&temp.path().join("none.xml"), CounterType::Line).unwrap_err();
    assert!(matches!(err, JacocoError::ReportNotFound { .. }));
    assert!(err.is_not_found());
    assert!(!err.is_parse_error());
}

#[test]
fn test_report_directory_is_not_a_report() {
    let temp = TempDir::new().unwrap();
    let err = summarize_report(temp.path(), CounterType::Line).unwrap_err();
    assert!(err.is_not_found());
}
