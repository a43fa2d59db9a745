//! Domain types for Android test generation.
//!
//! # Examples
//!
//! ```
//! use testgen_core::{ComponentCategory, ComponentDescriptor};
//!
//! let descriptor = ComponentDescriptor::new(
//!     "MainActivity",
//!     "com.example.app",
//!     ComponentCategory::Activity,
//!     "app/src/main/java/com/example/app/MainActivity.kt",
//! );
//!
//! assert_eq!(descriptor.qualified_name, "com.example.app.MainActivity");
//! assert_eq!(descriptor.test_class_name("Test"), "MainActivityTest");
//! ```

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Android component category recognized by the scanner.
///
/// The set is fixed: each category maps to exactly one test template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ComponentCategory {
    /// `android.app.Activity` and subclasses
    Activity,
    /// `android.app.Service` and subclasses
    Service,
    /// `android.content.BroadcastReceiver` and subclasses
    BroadcastReceiver,
    /// `androidx.lifecycle.ViewModel` and subclasses
    ViewModel,
}

impl ComponentCategory {
    /// All categories, in the order the scanner checks supertype suffixes.
    pub const ALL: [Self; 4] = [
        Self::BroadcastReceiver,
        Self::ViewModel,
        Self::Activity,
        Self::Service,
    ];

    /// Returns the category name as it appears in class names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "Activity",
            Self::Service => "Service",
            Self::BroadcastReceiver => "BroadcastReceiver",
            Self::ViewModel => "ViewModel",
        }
    }

    /// Returns the fully qualified import of the category's framework base class.
    #[must_use]
    pub const fn base_class_import(&self) -> &'static str {
        match self {
            Self::Activity => "android.app.Activity",
            Self::Service => "android.app.Service",
            Self::BroadcastReceiver => "android.content.BroadcastReceiver",
            Self::ViewModel => "androidx.lifecycle.ViewModel",
        }
    }

    /// Returns `true` for components that receive a `Context` and `Intent`.
    ///
    /// # Examples
    ///
    /// ```
    /// use testgen_core::ComponentCategory;
    ///
    /// assert!(ComponentCategory::Service.is_context_bound());
    /// assert!(!ComponentCategory::ViewModel.is_context_bound());
    /// ```
    #[must_use]
    pub const fn is_context_bound(&self) -> bool {
        !matches!(self, Self::ViewModel)
    }

    /// Classifies a supertype name by its suffix.
    ///
    /// Accepts simple or dotted names; only the last segment is inspected.
    ///
    /// # Examples
    ///
    /// ```
    /// use testgen_core::ComponentCategory;
    ///
    /// assert_eq!(
    ///     ComponentCategory::from_supertype("androidx.appcompat.app.AppCompatActivity"),
    ///     Some(ComponentCategory::Activity)
    /// );
    /// assert_eq!(
    ///     ComponentCategory::from_supertype("AndroidViewModel"),
    ///     Some(ComponentCategory::ViewModel)
    /// );
    /// assert_eq!(ComponentCategory::from_supertype("Fragment"), None);
    /// ```
    #[must_use]
    pub fn from_supertype(name: &str) -> Option<Self> {
        let simple = name.rsplit('.').next().unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|category| simple.ends_with(category.as_str()))
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component discovered by the scanner.
///
/// Immutable once created; each descriptor yields at most one rendered test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    /// Simple class name (`MainActivity`)
    pub simple_name: String,
    /// Package-qualified class name (`com.example.MainActivity`)
    pub qualified_name: String,
    /// Detected category
    pub category: ComponentCategory,
    /// Source file the class was found in
    pub source_path: PathBuf,
    /// Dotted package name, empty for the default package
    pub package_path: String,
}

impl ComponentDescriptor {
    /// Creates a descriptor, deriving the qualified name from the package.
    pub fn new(
        simple_name: impl Into<String>,
        package_path: impl Into<String>,
        category: ComponentCategory,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        let simple_name = simple_name.into();
        let package_path = package_path.into();
        let qualified_name = if package_path.is_empty() {
            simple_name.clone()
        } else {
            format!("{package_path}.{simple_name}")
        };

        Self {
            simple_name,
            qualified_name,
            category,
            source_path: source_path.into(),
            package_path,
        }
    }

    /// Returns the generated test class name.
    #[must_use]
    pub fn test_class_name(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.simple_name)
    }

    /// Returns the package as a relative directory path.
    ///
    /// # Examples
    ///
    /// ```
    /// use testgen_core::{ComponentCategory, ComponentDescriptor};
    /// use std::path::PathBuf;
    ///
    /// let d = ComponentDescriptor::new("Sync", "com.acme.sync", ComponentCategory::Service, "Sync.java");
    /// assert_eq!(d.package_dir(), PathBuf::from("com/acme/sync"));
    /// ```
    #[must_use]
    pub fn package_dir(&self) -> PathBuf {
        self.package_path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

/// A rendered test file awaiting write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTest {
    /// Destination path of the test file
    pub target_path: PathBuf,
    /// Complete file content
    pub content: String,
}

/// Covered and missed counts summed across a coverage report.
///
/// # Examples
///
/// ```
/// use testgen_core::CoverageTotals;
///
/// let totals = CoverageTotals::new(80, 20);
/// assert_eq!(totals.total(), 100);
/// assert_eq!(totals.percentage(), Some(80.0));
///
/// assert_eq!(CoverageTotals::default().percentage(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverageTotals {
    /// Covered units
    pub covered: u64,
    /// Missed units
    pub missed: u64,
}

impl CoverageTotals {
    /// Creates totals from raw counts.
    #[must_use]
    pub const fn new(covered: u64, missed: u64) -> Self {
        Self { covered, missed }
    }

    /// Adds another counter's values.
    #[must_use]
    pub const fn add(self, covered: u64, missed: u64) -> Self {
        Self {
            covered: self.covered.saturating_add(covered),
            missed: self.missed.saturating_add(missed),
        }
    }

    /// Returns covered + missed.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.covered.saturating_add(self.missed)
    }

    /// Returns coverage as a percentage, or `None` when there is no data.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.covered as f64 * 100.0 / total as f64)
    }
}
