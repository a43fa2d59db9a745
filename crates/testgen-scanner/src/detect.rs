//! Textual component detection for a single source text.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use testgen_core::{ComponentCategory, ComponentDescriptor};
use tracing::{debug, warn};

// Pre-compiled regexes (compiled once, reused for every file)
static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("valid regex"));
static PACKAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*package[ \t]+([^\s;]+)").expect("valid regex"));
static PACKAGE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("valid regex")
});
static CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex"));
static SUPERTYPES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\bextends\s+|:\s*)([A-Za-z_][\w.]*(?:\s*,\s*[A-Za-z_][\w.]*)*)")
        .expect("valid regex")
});
static DECLARATION_START_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[ \t]*(?:@|(?:(?:public|private|internal|protected|abstract|open|final|sealed|data|inline|value|enum|annotation|companion|override|suspend|const|lateinit|operator|infix|tailrec|external)[ \t]+)*(?:object|fun|val|var|interface|typealias)\b)",
    )
    .expect("valid regex")
});
static HILT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@HiltViewModel\b[^{;]*?\bclass\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex")
});

/// Removes `//` and `/* */` comments, keeping line breaks.
///
/// # Examples
///
/// ```
/// use testgen_scanner::strip_comments;
///
/// let code = strip_comments("a // note\n/* x\ny */ b");
/// assert_eq!(code, "a \n\n b");
/// ```
#[must_use]
pub fn strip_comments(source: &str) -> Cow<'_, str> {
    COMMENT_REGEX.replace_all(source, |caps: &Captures<'_>| {
        caps[0].chars().filter(|&c| c == '\n').collect::<String>()
    })
}

/// Finds every supported component declared in `text`.
///
/// `fallback_package` is used when the file has no `package` declaration or
/// the declaration is malformed. Classes matching no category are skipped.
/// A class name reported twice in the same file is kept once.
#[must_use]
pub fn parse_source(text: &str, path: &Path, fallback_package: &str) -> Vec<ComponentDescriptor> {
    let code = strip_comments(text);
    let package = declared_package(&code, path).unwrap_or_else(|| fallback_package.to_string());

    let hilt_view_models: HashSet<&str> = HILT_REGEX
        .captures_iter(&code)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let declarations: Vec<Captures<'_>> = CLASS_REGEX.captures_iter(&code).collect();
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for (index, caps) in declarations.iter().enumerate() {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let limit = declarations
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(code.len(), |m| m.start());
        let header = &code[whole.end()..header_end(&code, whole.end(), limit)];

        let category = if hilt_view_models.contains(name.as_str()) {
            Some(ComponentCategory::ViewModel)
        } else {
            classify_header(header)
        };

        let Some(category) = category else {
            debug!("{} in {} is not a supported component", name.as_str(), path.display());
            continue;
        };

        if !seen.insert(name.as_str()) {
            continue;
        }

        found.push(ComponentDescriptor::new(
            name.as_str(),
            package.clone(),
            category,
            path,
        ));
    }

    found
}

/// Returns where the declaration header starting at `start` ends.
///
/// The header stops at the first `{` outside parentheses, or before a line
/// that opens another top-level declaration (bodyless Kotlin classes).
fn header_end(code: &str, start: usize, limit: usize) -> usize {
    let mut depth = 0usize;
    for (offset, c) in code[start..limit].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '{' if depth == 0 => return start + offset,
            '\n' if depth == 0 => {
                let next_line = start + offset + 1;
                if DECLARATION_START_REGEX.is_match(&code[next_line..limit]) {
                    return next_line;
                }
            }
            _ => {}
        }
    }
    limit
}

fn declared_package(code: &str, path: &Path) -> Option<String> {
    let declared = PACKAGE_REGEX.captures(code)?.get(1)?.as_str();
    if PACKAGE_NAME_REGEX.is_match(declared) {
        Some(declared.to_string())
    } else {
        warn!(
            "Malformed package declaration '{declared}' in {}, falling back to directory layout",
            path.display()
        );
        None
    }
}

/// Classifies a class header (the text between the class name and its body).
fn classify_header(header: &str) -> Option<ComponentCategory> {
    let flat = flatten_header(header);
    let supertypes = SUPERTYPES_REGEX.captures(&flat)?.get(1)?.as_str();
    supertypes
        .split(',')
        .map(str::trim)
        .find_map(ComponentCategory::from_supertype)
}

/// Drops parenthesized and angle-bracketed groups.
///
/// Kotlin constructor parameters contain `name: Type` pairs and type
/// parameters may carry `T : Bound`; both would otherwise read as supertypes.
fn flatten_header(header: &str) -> String {
    let mut parens = 0usize;
    let mut angles = 0usize;
    let mut flat = String::with_capacity(header.len());

    for c in header.chars() {
        match c {
            '(' => parens += 1,
            ')' => {
                parens = parens.saturating_sub(1);
                if parens == 0 && angles == 0 {
                    flat.push(' ');
                }
            }
            '<' => angles += 1,
            '>' if angles > 0 => {
                angles -= 1;
                if parens == 0 && angles == 0 {
                    flat.push(' ');
                }
            }
            _ if parens == 0 && angles == 0 => flat.push(c),
            _ => {}
        }
    }

    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<ComponentDescriptor> {
        parse_source(text, Path::new("Source.kt"), "fallback.pkg")
    }

    #[test]
    fn test_java_activity() {
        let found = parse(
            r"
package com.example.app;

import androidx.appcompat.app.AppCompatActivity;

public class MainActivity extends AppCompatActivity implements View.OnClickListener {
    @Override
    protected void onCreate(Bundle savedInstanceState) {}
}
",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].simple_name, "MainActivity");
        assert_eq!(found[0].qualified_name, "com.example.app.MainActivity");
        assert_eq!(found[0].category, ComponentCategory::Activity);
    }

    #[test]
    fn test_java_fully_qualified_service() {
        let found = parse("package a.b;\nclass SyncService extends android.app.Service {}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, ComponentCategory::Service);
    }

    #[test]
    fn test_kotlin_receiver() {
        let found = parse(
            "package com.example.receivers\n\nclass BootReceiver : BroadcastReceiver() {\n}\n",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, ComponentCategory::BroadcastReceiver);
        assert_eq!(found[0].package_path, "com.example.receivers");
    }

    #[test]
    fn test_kotlin_constructor_params_are_not_supertypes() {
        let found = parse(
            r"
package com.example.detail

class DetailViewModel(
    private val service: SyncService,
    private val handle: SavedStateHandle,
) : ViewModel() {
}
",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, ComponentCategory::ViewModel);
    }

    #[test]
    fn test_kotlin_type_parameter_bound_ignored() {
        let found = parse("package p\nclass Paged<T : LocalService> : AndroidViewModel(app) {}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, ComponentCategory::ViewModel);
    }

    #[test]
    fn test_kotlin_interface_listed_first() {
        let found = parse("package p\nclass Player : LifecycleObserver, MediaBrowserService() {}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, ComponentCategory::Service);
    }

    #[test]
    fn test_hilt_annotation_marks_view_model() {
        let found = parse(
            r"
package com.example.home

@HiltViewModel
class HomeViewModel @Inject constructor(
    private val repository: UserRepository,
) : BaseScreenModel() {
}
",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].simple_name, "HomeViewModel");
        assert_eq!(found[0].category, ComponentCategory::ViewModel);
    }

    #[test]
    fn test_unrelated_class_skipped() {
        assert!(parse("package p\nclass HomeFragment : Fragment() {}").is_empty());
        assert!(parse("package p;\npublic class Utils {}").is_empty());
    }

    #[test]
    fn test_class_literal_is_not_a_declaration() {
        let found = parse(
            "package p\nclass Launcher : Activity() {\n  val target = SyncService::class.java\n}\n",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].simple_name, "Launcher");
    }

    #[test]
    fn test_commented_out_class_ignored() {
        let found = parse(
            "package p\n// class OldActivity : Activity()\n/* class OldService : Service() */\n",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_multiple_components_in_one_file() {
        let found = parse(
            "package p\nclass A : Activity() {}\nclass B : BroadcastReceiver() {}\nclass C\n",
        );
        let names: Vec<_> = found.iter().map(|d| d.simple_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_bodyless_kotlin_class_does_not_borrow_next_header() {
        let found = parse("package p\nclass Marker\nclass Screen : ComponentActivity() {}\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].simple_name, "Screen");
    }

    #[test]
    fn test_bodyless_class_before_function_is_not_a_component() {
        let found = parse(
            "package p\n\ndata class SyncState(val running: Boolean)\n\nfun Context.syncService(): SyncService {\n    return SyncService()\n}\n",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_bodyless_class_before_object_is_not_a_component() {
        let found = parse("package p\n\nclass Marker\n\nobject BootReceiver : BroadcastReceiver() {}\n");
        assert!(found.is_empty());
    }

    #[test]
    fn test_bodyless_class_before_property_and_annotation() {
        assert!(parse("package p\nclass Token\nval service: Service = create()\n").is_empty());
        assert!(
            parse("package p\nclass Token\n@Suppress(\"x\")\nprivate val receiver: BroadcastReceiver? = null\n")
                .is_empty()
        );
    }

    #[test]
    fn test_constructor_properties_stay_in_header() {
        let found = parse(
            "package p\nclass CartModel(\n    private val repo: Repo,\n    val id: Int,\n) : ViewModel() {}\n",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, ComponentCategory::ViewModel);
    }

    #[test]
    fn test_brace_inside_constructor_defaults_is_not_body() {
        let found = parse(
            "package p\nclass Player(val onDone: () -> Unit = {}) : MediaBrowserService() {}\n",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, ComponentCategory::Service);
    }

    #[test]
    fn test_missing_package_uses_fallback() {
        let found = parse("class Boot : BroadcastReceiver() {}");
        assert_eq!(found[0].package_path, "fallback.pkg");
        assert_eq!(found[0].qualified_name, "fallback.pkg.Boot");
    }

    #[test]
    fn test_malformed_package_uses_fallback() {
        let found = parse("package com.example-app;\nclass Boot extends BroadcastReceiver {}");
        assert_eq!(found[0].package_path, "fallback.pkg");
    }

    #[test]
    fn test_duplicate_names_reported_once() {
        let found = parse("package p\nclass A : Activity() {}\nclass A : Activity() {}\n");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_flatten_header_removes_groups() {
        assert_eq!(
            flatten_header(" @Inject constructor(val s: Service) : ViewModel() "),
            " @Inject constructor  : ViewModel  "
        );
        assert_eq!(flatten_header("<T : X> extends Base<T>"), "  extends Base ");
    }
}
