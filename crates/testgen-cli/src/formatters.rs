//! Output formatters for the run report.
//!
//! Logs go to stderr; these formatters produce what is printed on stdout.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use testgen_core::cli::OutputFormat;

/// Formats data according to the specified output format.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use testgen_cli::formatters::format_output;
/// use testgen_core::cli::OutputFormat;
///
/// #[derive(Serialize)]
/// struct Totals {
///     created: usize,
/// }
///
/// let output = format_output(&Totals { created: 3 }, OutputFormat::Text)?;
/// assert_eq!(output, "created=3");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
///
/// One `dotted.key=value` line per leaf, keys sorted. Arrays use
/// `key[index]`; empty arrays and nulls are omitted.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Formats data as `key=value` lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten(&value, "", &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(value: &Value, prefix: &str, lines: &mut Vec<String>) {
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, val) in map {
                    let path = if prefix.is_empty() {
                        key.to_string()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    flatten(val, &path, lines);
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    flatten(item, &format!("{prefix}[{i}]"), lines);
                }
            }
            Value::String(s) => lines.push(format!("{prefix}={s}")),
            Value::Bool(_) | Value::Number(_) => lines.push(format!("{prefix}={value}")),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Formats data as an indented, colorized outline.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&value, 0, &mut out);
        Ok(out.trim_end().to_string())
    }

    fn write_value(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    match val {
                        Value::Null => {}
                        Value::Object(_) => {
                            out.push_str(&format!("{pad}{}\n", key.blue().bold()));
                            write_value(val, indent + 1, out);
                        }
                        Value::Array(items) if items.is_empty() => {
                            out.push_str(&format!("{pad}{}: {}\n", key.blue().bold(), "none".dimmed()));
                        }
                        Value::Array(_) => {
                            out.push_str(&format!("{pad}{}:\n", key.blue().bold()));
                            write_value(val, indent + 1, out);
                        }
                        _ => {
                            out.push_str(&format!("{pad}{}: {}\n", key.blue().bold(), scalar(val)));
                        }
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if item.is_object() {
                        out.push_str(&format!("{pad}-\n"));
                        write_value(item, indent + 1, out);
                    } else {
                        out.push_str(&format!("{pad}- {}\n", scalar(item)));
                    }
                }
            }
            _ => out.push_str(&format!("{pad}{}\n", scalar(value))),
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Null => "null".dimmed().to_string(),
            other => other.to_string(),
        }
    }
}
