//! End-to-end runs of the generator over a temporary Android project.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use testgen_cli::{RunOptions, exit_code_for, run};
use testgen_core::cli::ExitCode;
use testgen_jacoco::{CounterType, PatchOutcome};
use testgen_scanner::MAX_FILE_SIZE;

const SOURCES: &[(&str, &str)] = &[
    (
        "app/src/main/java/com/acme/shop/MainActivity.kt",
        "package com.acme.shop\n\nimport androidx.appcompat.app.AppCompatActivity\n\nclass MainActivity : AppCompatActivity() {\n}\n",
    ),
    (
        "app/src/main/java/com/acme/shop/sync/SyncService.java",
        "package com.acme.shop.sync;\n\nimport android.app.Service;\n\npublic class SyncService extends Service {\n}\n",
    ),
    (
        "app/src/main/java/com/acme/shop/BootReceiver.java",
        "package com.acme.shop;\n\npublic class BootReceiver extends BroadcastReceiver {\n}\n",
    ),
    (
        "app/src/main/java/com/acme/shop/cart/CartViewModel.kt",
        "package com.acme.shop.cart\n\n@HiltViewModel\nclass CartViewModel @Inject constructor(\n    private val repo: CartRepository,\n) : BaseViewModel() {\n}\n",
    ),
    (
        "app/src/main/java/com/acme/shop/util/Strings.kt",
        "package com.acme.shop.util\n\nobject Strings {\n    fun blank(s: String) = s.isBlank()\n}\n",
    ),
    ("app/src/main/res/values/strings.xml", "<resources/>\n"),
];

const EXPECTED_TESTS: &[&str] = &[
    "app/src/test/java/com/acme/shop/BootReceiverTest.java",
    "app/src/test/java/com/acme/shop/MainActivityTest.java",
    "app/src/test/java/com/acme/shop/cart/CartViewModelTest.java",
    "app/src/test/java/com/acme/shop/sync/SyncServiceTest.java",
];

fn android_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    for (path, content) in SOURCES {
        let full = temp.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    fs::write(
        temp.path().join("app/build.gradle"),
        "plugins {\n    id 'com.android.application'\n}\n",
    )
    .unwrap();
    temp
}

fn options(root: &Path) -> RunOptions {
    RunOptions {
        project_root: root.to_path_buf(),
        ..RunOptions::default()
    }
}

fn read_tests(root: &Path) -> Vec<String> {
    EXPECTED_TESTS
        .iter()
        .map(|path| fs::read_to_string(root.join(path)).unwrap())
        .collect()
}

#[test]
fn test_generates_one_test_per_component() {
    let temp = android_project();

    let report = run(&options(temp.path())).unwrap();

    let mut created = report.generation.created.clone();
    created.sort();
    assert_eq!(created, EXPECTED_TESTS);
    assert_eq!(report.generation.components, 4);
    assert!(report.jacoco.is_none());
    assert!(report.coverage.is_none());

    let view_model = fs::read_to_string(temp.path().join(EXPECTED_TESTS[2])).unwrap();
    assert!(view_model.contains("package com.acme.shop.cart;"));
    assert!(view_model.contains("public class CartViewModelTest"));
    assert!(view_model.contains("import com.acme.shop.cart.CartViewModel;"));
}

#[test]
fn test_rerun_without_force_changes_nothing() {
    let temp = android_project();
    run(&options(temp.path())).unwrap();
    fs::write(temp.path().join(EXPECTED_TESTS[0]), "// customized\n").unwrap();
    let before = read_tests(temp.path());

    let report = run(&options(temp.path())).unwrap();

    assert!(report.generation.created.is_empty());
    assert!(report.generation.overwritten.is_empty());
    assert_eq!(report.generation.skipped.len(), 4);
    assert_eq!(read_tests(temp.path()), before);
}

#[test]
fn test_rerun_with_force_overwrites() {
    let temp = android_project();
    run(&options(temp.path())).unwrap();
    fs::write(temp.path().join(EXPECTED_TESTS[0]), "// customized\n").unwrap();

    let report = run(&RunOptions {
        force: true,
        ..options(temp.path())
    })
    .unwrap();

    assert_eq!(report.generation.overwritten.len(), 4);
    let restored = fs::read_to_string(temp.path().join(EXPECTED_TESTS[0])).unwrap();
    assert!(restored.contains("public class BootReceiverTest"));
}

#[test]
fn test_config_file_changes_roots_and_suffix() {
    let temp = android_project();
    fs::write(
        temp.path().join("testgen.toml"),
        "test_root = \"app/src/unit/java\"\ntest_suffix = \"UnitTest\"\nextensions = [\"java\"]\n",
    )
    .unwrap();

    let report = run(&options(temp.path())).unwrap();

    let mut created = report.generation.created.clone();
    created.sort();
    assert_eq!(
        created,
        vec![
            "app/src/unit/java/com/acme/shop/BootReceiverUnitTest.java",
            "app/src/unit/java/com/acme/shop/sync/SyncServiceUnitTest.java",
        ]
    );
}

#[test]
fn test_invalid_config_is_invalid_input() {
    let temp = android_project();
    fs::write(temp.path().join("testgen.toml"), "unknown_key = 1\n").unwrap();

    let err = run(&options(temp.path())).unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
}

#[test]
fn test_jacoco_patch_is_idempotent() {
    let temp = android_project();
    let with_jacoco = RunOptions {
        jacoco: true,
        ..options(temp.path())
    };

    let first = run(&with_jacoco).unwrap();
    assert_eq!(first.jacoco.unwrap().outcome, PatchOutcome::Patched);
    let once = fs::read_to_string(temp.path().join("app/build.gradle")).unwrap();

    let second = run(&with_jacoco).unwrap();
    assert_eq!(second.jacoco.unwrap().outcome, PatchOutcome::AlreadyPresent);
    let twice = fs::read_to_string(temp.path().join("app/build.gradle")).unwrap();

    assert_eq!(once, twice);
    assert!(twice.contains("toolVersion = \"0.8.10\""));
}

#[test]
fn test_jacoco_with_missing_build_file_fails() {
    let temp = android_project();
    let err = run(&RunOptions {
        jacoco: true,
        build_file: Some(PathBuf::from("missing/build.gradle")),
        ..options(temp.path())
    })
    .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
}

#[test]
fn test_coverage_summary_in_report() {
    let temp = android_project();
    let report_path = temp.path().join("app/build/jacoco.xml");
    fs::create_dir_all(report_path.parent().unwrap()).unwrap();
    fs::write(
        &report_path,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<!DOCTYPE report PUBLIC "-//JACOCO//DTD Report 1.1//EN" "report.dtd">
<report name="app">
  <package name="com/acme/shop">
    <counter type="INSTRUCTION" missed="1" covered="1"/>
  </package>
  <counter type="INSTRUCTION" missed="20" covered="80"/>
  <counter type="BRANCH" missed="0" covered="0"/>
</report>
"#,
    )
    .unwrap();

    let report = run(&RunOptions {
        coverage_report: Some(PathBuf::from("app/build/jacoco.xml")),
        ..options(temp.path())
    })
    .unwrap();
    let coverage = report.coverage.unwrap();
    assert_eq!((coverage.covered, coverage.missed), (80, 20));
    assert_eq!(coverage.summary, "80.00%");

    let branch = run(&RunOptions {
        coverage_report: Some(PathBuf::from("app/build/jacoco.xml")),
        counter: CounterType::Branch,
        ..options(temp.path())
    })
    .unwrap();
    assert_eq!(branch.coverage.unwrap().summary, "no data");
}

#[test]
fn test_malformed_coverage_report_fails_with_parse_error() {
    let temp = android_project();
    fs::write(temp.path().join("bad.xml"), "<report><counter>").unwrap();

    let err = run(&RunOptions {
        coverage_report: Some(PathBuf::from("bad.xml")),
        ..options(temp.path())
    })
    .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::PARSE_ERROR);
}

#[test]
fn test_missing_project_root_fails() {
    let temp = TempDir::new().unwrap();
    let err = run(&options(&temp.path().join("nope"))).unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
}

#[test]
fn test_oversized_source_file_does_not_stop_jacoco() {
    let temp = android_project();
    let huge = "app/src/main/java/com/acme/shop/HugeActivity.java";
    let mut content = String::from("package com.acme.shop;\nclass HugeActivity extends Activity {}\n");
    content.push_str(&" ".repeat(usize::try_from(MAX_FILE_SIZE).unwrap()));
    fs::write(temp.path().join(huge), content).unwrap();

    let report = run(&RunOptions {
        source_file: Some(PathBuf::from(huge)),
        jacoco: true,
        ..options(temp.path())
    })
    .unwrap();

    assert_eq!(report.generation.components, 0);
    assert_eq!(report.generation.files_skipped, vec![huge]);
    assert_eq!(report.jacoco.unwrap().outcome, PatchOutcome::Patched);
}
