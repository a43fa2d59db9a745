//! JaCoCo XML report summaries.
//!
//! Only the report-level counters (direct children of the root `report`
//! element) are summed. Package, class, and method counters repeat the same
//! units at finer granularity and would be counted several times over.

use crate::error::JacocoError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use testgen_core::CoverageTotals;
use tracing::{debug, warn};

/// JaCoCo counter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CounterType {
    /// Java bytecode instructions
    #[default]
    Instruction,
    /// Branches at `if` and `switch`
    Branch,
    /// Source lines
    Line,
    /// Cyclomatic complexity
    Complexity,
    /// Methods
    Method,
    /// Classes
    Class,
}

impl CounterType {
    /// Returns the `type` attribute value used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instruction => "INSTRUCTION",
            Self::Branch => "BRANCH",
            Self::Line => "LINE",
            Self::Complexity => "COMPLEXITY",
            Self::Method => "METHOD",
            Self::Class => "CLASS",
        }
    }

    /// Returns the plural noun used when printing counts.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Instruction => "instructions",
            Self::Branch => "branches",
            Self::Line => "lines",
            Self::Complexity => "complexity",
            Self::Method => "methods",
            Self::Class => "classes",
        }
    }
}

impl fmt::Display for CounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounterType {
    type Err = JacocoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INSTRUCTION" => Ok(Self::Instruction),
            "BRANCH" => Ok(Self::Branch),
            "LINE" => Ok(Self::Line),
            "COMPLEXITY" => Ok(Self::Complexity),
            "METHOD" => Ok(Self::Method),
            "CLASS" => Ok(Self::Class),
            _ => Err(JacocoError::UnknownCounterType(s.to_string())),
        }
    }
}

/// Summed counters for one counter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverageSummary {
    /// Counter type that was summed
    pub counter: CounterType,
    /// Summed covered/missed values
    pub totals: CoverageTotals,
    /// Number of matching counter elements
    pub matched: usize,
}

impl CoverageSummary {
    /// Returns coverage as a percentage, or `None` when there is no data.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        if self.matched == 0 {
            return None;
        }
        self.totals.percentage()
    }

    /// Returns `true` if at least one matching counter with a non-zero total was found.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.percentage().is_some()
    }
}

/// Reads and summarizes a report file.
///
/// # Errors
///
/// Returns [`JacocoError::ReportNotFound`] if the file is missing,
/// [`JacocoError::Io`] if it cannot be read, or a parse error if the XML
/// is malformed.
pub fn summarize_report(path: &Path, counter: CounterType) -> Result<CoverageSummary, JacocoError> {
    if !path.is_file() {
        return Err(JacocoError::ReportNotFound {
            path: path.to_path_buf(),
        });
    }

    let xml = fs::read_to_string(path).map_err(|source| JacocoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes of coverage report from {}", xml.len(), path.display());
    summarize_xml(&xml, counter)
}

/// Summarizes report XML held in memory.
///
/// # Errors
///
/// Returns a parse error if the document is not well-formed, has no root
/// element, or a matching counter carries a non-numeric value.
pub fn summarize_xml(xml: &str, counter: CounterType) -> Result<CoverageSummary, JacocoError> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut summary = CoverageSummary {
        counter,
        totals: CoverageTotals::default(),
        matched: 0,
    };

    loop {
        let event = reader.read_event().map_err(|source| JacocoError::Xml {
            position: reader.error_position().to_string(),
            source,
        })?;

        match event {
            Event::Start(element) => {
                if depth == 0 {
                    check_root(&element, saw_root)?;
                    saw_root = true;
                } else if depth == 1 {
                    accumulate(&element, &mut summary)?;
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if depth == 0 {
                    check_root(&element, saw_root)?;
                    saw_root = true;
                } else if depth == 1 {
                    accumulate(&element, &mut summary)?;
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(JacocoError::Malformed {
            message: "document has no root element".to_string(),
        });
    }
    if depth != 0 {
        return Err(JacocoError::Malformed {
            message: "unexpected end of document".to_string(),
        });
    }

    if summary.matched == 0 {
        warn!("No {} counter found in report", counter);
    }
    Ok(summary)
}

fn check_root(element: &BytesStart<'_>, saw_root: bool) -> Result<(), JacocoError> {
    if saw_root {
        return Err(JacocoError::Malformed {
            message: "multiple root elements".to_string(),
        });
    }
    if element.name().as_ref() != b"report" {
        warn!(
            "Root element is <{}>, expected <report>",
            String::from_utf8_lossy(element.name().as_ref())
        );
    }
    Ok(())
}

/// Adds a `<counter>` element's values if its type matches.
fn accumulate(element: &BytesStart<'_>, summary: &mut CoverageSummary) -> Result<(), JacocoError> {
    if element.name().as_ref() != b"counter" {
        return Ok(());
    }

    let mut kind = None;
    let mut covered = 0;
    let mut missed = 0;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| JacocoError::Malformed {
            message: format!("invalid attribute: {e}"),
        })?;
        let value = attr
            .unescape_value()
            .map_err(|e| JacocoError::Malformed {
                message: format!("invalid attribute value: {e}"),
            })?;

        match attr.key.as_ref() {
            b"type" => kind = Some(value.into_owned()),
            b"covered" => covered = parse_count("covered", &value)?,
            b"missed" => missed = parse_count("missed", &value)?,
            _ => {}
        }
    }

    if kind.as_deref() == Some(summary.counter.as_str()) {
        summary.totals = summary.totals.add(covered, missed);
        summary.matched += 1;
    }
    Ok(())
}

fn parse_count(attribute: &str, value: &str) -> Result<u64, JacocoError> {
    value.trim().parse().map_err(|_| JacocoError::InvalidCounter {
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}
