//! Integration tests for scanning project trees.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use testgen_core::{ComponentCategory, GeneratorConfig};
use testgen_scanner::{ComponentScanner, MAX_FILE_SIZE, ScanError};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn scanner() -> ComponentScanner {
    ComponentScanner::from_config(&GeneratorConfig::default())
}

#[test]
fn test_scan_finds_all_four_categories() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "com/example/MainActivity.java",
        "package com.example;\npublic class MainActivity extends AppCompatActivity {}\n",
    );
    write(
        root,
        "com/example/sync/SyncService.kt",
        "package com.example.sync\nclass SyncService : LifecycleService() {}\n",
    );
    write(
        root,
        "com/example/BootReceiver.kt",
        "package com.example\nclass BootReceiver : BroadcastReceiver() {}\n",
    );
    write(
        root,
        "com/example/ui/HomeViewModel.kt",
        "package com.example.ui\nclass HomeViewModel : ViewModel() {}\n",
    );

    let report = scanner().scan_dir(root);

    assert_eq!(report.files_scanned, 4);
    assert!(report.files_skipped.is_empty());

    let mut found: Vec<_> = report
        .components
        .iter()
        .map(|d| (d.qualified_name.as_str(), d.category))
        .collect();
    found.sort();
    assert_eq!(
        found,
        vec![
            ("com.example.BootReceiver", ComponentCategory::BroadcastReceiver),
            ("com.example.MainActivity", ComponentCategory::Activity),
            ("com.example.sync.SyncService", ComponentCategory::Service),
            ("com.example.ui.HomeViewModel", ComponentCategory::ViewModel),
        ]
    );
}

#[test]
fn test_scan_ignores_non_components_and_other_extensions() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "p/Utils.java", "package p;\npublic class Utils {}\n");
    write(
        root,
        "p/activity_main.xml",
        "<LinearLayout class MainActivity extends Activity />",
    );
    write(root, "p/Notes.txt", "class Fake : Activity()");

    let report = scanner().scan_dir(root);

    assert_eq!(report.files_scanned, 1);
    assert!(report.components.is_empty());
}

#[test]
fn test_scan_missing_root_is_empty() {
    let temp = TempDir::new().unwrap();
    let report = scanner().scan_dir(&temp.path().join("does/not/exist"));
    assert_eq!(report.files_scanned, 0);
    assert!(report.components.is_empty());
}

#[test]
fn test_scan_package_falls_back_to_directory() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "org/demo/widgets/Clock.kt",
        "class ClockReceiver : BroadcastReceiver() {}\n",
    );

    let report = scanner().scan_dir(temp.path());

    assert_eq!(report.components.len(), 1);
    assert_eq!(report.components[0].package_path, "org.demo.widgets");
    assert_eq!(
        report.components[0].qualified_name,
        "org.demo.widgets.ClockReceiver"
    );
}

#[test]
fn test_scan_tolerates_invalid_utf8() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Legacy.java");
    let mut bytes = b"package legacy;\n// \xff\xfe\nclass LegacyService extends Service {}\n".to_vec();
    bytes.push(b'\n');
    fs::write(&path, bytes).unwrap();

    let report = scanner().scan_dir(temp.path());
    assert_eq!(report.components.len(), 1);
    assert_eq!(report.components[0].category, ComponentCategory::Service);
}

#[test]
fn test_scan_file_single_mode() {
    let temp = TempDir::new().unwrap();
    let source_root = temp.path().join("app/src/main/java");
    write(
        &source_root,
        "com/x/DetailViewModel.kt",
        "package com.x\nclass DetailViewModel : ViewModel()\n",
    );

    let found = scanner()
        .scan_file(&source_root.join("com/x/DetailViewModel.kt"), &source_root)
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].qualified_name, "com.x.DetailViewModel");
}

#[test]
fn test_scan_file_rejects_missing_and_unsupported() {
    let temp = TempDir::new().unwrap();

    let err = scanner()
        .scan_file(&temp.path().join("Missing.kt"), temp.path())
        .unwrap_err();
    assert!(matches!(err, ScanError::FileNotFound { .. }));
    assert!(err.is_skippable());

    write(temp.path(), "strings.xml", "<resources/>");
    let err = scanner()
        .scan_file(&temp.path().join("strings.xml"), temp.path())
        .unwrap_err();
    assert!(matches!(err, ScanError::UnsupportedFile { .. }));
}

#[test]
fn test_scan_order_is_deterministic() {
    let temp = TempDir::new().unwrap();
    for name in ["Zeta", "Alpha", "Mid"] {
        write(
            temp.path(),
            &format!("p/{name}Activity.kt"),
            &format!("package p\nclass {name}Activity : Activity() {{}}\n"),
        );
    }

    let names: Vec<_> = scanner()
        .scan_dir(temp.path())
        .components
        .into_iter()
        .map(|d| d.simple_name)
        .collect();
    assert_eq!(names, vec!["AlphaActivity", "MidActivity", "ZetaActivity"]);
}

#[test]
fn test_oversized_file_is_skipped_and_scan_continues() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "com/example/MainActivity.java",
        "package com.example;\npublic class MainActivity extends Activity {}\n",
    );
    let mut huge = String::from("package com.example;\nclass HugeActivity extends Activity {}\n");
    huge.push_str(&"/".repeat(usize::try_from(MAX_FILE_SIZE).unwrap()));
    write(root, "com/example/HugeActivity.java", &huge);

    let report = scanner().scan_dir(root);

    assert_eq!(report.files_scanned, 2);
    assert_eq!(
        report.files_skipped,
        vec![root.join("com/example/HugeActivity.java")]
    );
    let names: Vec<_> = report.components.iter().map(|d| d.simple_name.as_str()).collect();
    assert_eq!(names, vec!["MainActivity"]);
}

#[test]
fn test_oversized_single_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let content = " ".repeat(usize::try_from(MAX_FILE_SIZE).unwrap() + 1);
    write(temp.path(), "Big.kt", &content);

    let err = scanner()
        .scan_file(&temp.path().join("Big.kt"), temp.path())
        .unwrap_err();
    assert!(matches!(
        err,
        ScanError::FileTooLarge { size, limit, .. } if size == limit + 1
    ));
}
