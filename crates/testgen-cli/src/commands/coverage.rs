//! Coverage summary command.

use super::display_path;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use testgen_jacoco::{CounterType, CoverageSummary, summarize_report};
use tracing::{info, warn};

/// Coverage numbers for one counter type.
#[derive(Debug, Serialize)]
pub struct CoverageReport {
    /// Report that was read
    pub report: String,
    /// Counter type that was summed
    pub counter: CounterType,
    /// Covered units
    pub covered: u64,
    /// Missed units
    pub missed: u64,
    /// Percentage, absent when there is no data
    pub percentage: Option<f64>,
    /// Percentage with two decimals, or `no data`
    pub summary: String,
}

impl CoverageReport {
    fn new(report: String, summary: &CoverageSummary) -> Self {
        let percentage = summary.percentage();
        Self {
            report,
            counter: summary.counter,
            covered: summary.totals.covered,
            missed: summary.totals.missed,
            percentage,
            summary: format_percentage(percentage),
        }
    }
}

/// Formats a percentage with two decimals.
///
/// # Examples
///
/// ```
/// use testgen_cli::commands::coverage::format_percentage;
///
/// assert_eq!(format_percentage(Some(80.0)), "80.00%");
/// assert_eq!(format_percentage(None), "no data");
/// ```
#[must_use]
pub fn format_percentage(percentage: Option<f64>) -> String {
    percentage.map_or_else(|| "no data".to_string(), |pct| format!("{pct:.2}%"))
}

/// Summarizes a JaCoCo XML report.
///
/// # Errors
///
/// Returns an error if the report is missing, unreadable, or malformed.
pub fn run(project_root: &Path, report: &Path, counter: CounterType) -> Result<CoverageReport> {
    let summary = summarize_report(report, counter)
        .with_context(|| format!("failed to summarize coverage report {}", report.display()))?;

    let result = CoverageReport::new(display_path(project_root, report), &summary);
    if summary.has_data() {
        let unit = counter.unit();
        info!("Coverage summary (JaCoCo):");
        info!("  Covered {unit}: {}", result.covered);
        info!("  Missed {unit}: {}", result.missed);
        info!("  Coverage: {}", result.summary);
    } else {
        warn!("No {counter} coverage data in {}", report.display());
    }
    Ok(result)
}
