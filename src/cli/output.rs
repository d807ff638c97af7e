//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::Chunk;
use crate::core::chunk::find_char_boundary;
use crate::error::{CommandError, Error, Result};
use crate::reveal::RevealStep;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    ///
    /// # Errors
    ///
    /// Returns an error for formats other than `text` and `json`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CommandError::OutputFormat(other.to_string()).into()),
        }
    }
}

/// Result of cleaning one input.
#[derive(Debug, Clone, Serialize)]
pub struct CleanResult {
    /// Input source label (path or `<stdin>`).
    pub source: String,
    /// Stage that was run.
    pub stage: String,
    /// Input size in bytes.
    pub input_bytes: usize,
    /// Output size in bytes.
    pub output_bytes: usize,
    /// Repaired text.
    pub text: String,
}

/// Formats clean results.
///
/// A single result in text mode prints the repaired text alone; multiple
/// results or verbose mode add a per-source header with size figures.
#[must_use]
pub fn format_clean_results(results: &[CleanResult], verbose: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_clean_text(results, verbose),
        OutputFormat::Json => format_json(&results),
    }
}

fn format_clean_text(results: &[CleanResult], verbose: bool) -> String {
    if results.len() == 1 && !verbose {
        return with_trailing_newline(&results[0].text);
    }

    let mut output = String::new();
    for result in results {
        let _ = writeln!(
            output,
            "== {} [{}] ({} -> {} bytes)",
            result.source, result.stage, result.input_bytes, result.output_bytes
        );
        output.push_str(&with_trailing_newline(&result.text));
        output.push('\n');
    }
    output
}

/// Formats the reveal chunk schedule.
#[must_use]
pub fn format_chunks(chunks: &[Chunk], steps: &[RevealStep], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_chunks_text(chunks, steps),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "chunk_count": chunks.len(),
                "chunks": chunks.iter().zip(steps).map(|(chunk, step)| {
                    serde_json::json!({
                        "index": chunk.index,
                        "at_ms": step.at_ms,
                        "size": chunk.size(),
                        "content": chunk.content
                    })
                }).collect::<Vec<_>>()
            });
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

fn format_chunks_text(chunks: &[Chunk], steps: &[RevealStep]) -> String {
    if chunks.is_empty() {
        return "No chunks.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "{} chunks:\n", chunks.len());
    let _ = writeln!(
        output,
        "{:<6} {:<8} {:<8} Preview",
        "Index", "At(ms)", "Bytes"
    );
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for (chunk, step) in chunks.iter().zip(steps) {
        let preview = truncate(&chunk.content.replace('\n', "\\n"), 32);
        let _ = writeln!(
            output,
            "{:<6} {:<8} {:<8} {}",
            chunk.index,
            step.at_ms,
            chunk.size(),
            preview
        );
    }

    output
}

/// Formats an error for display.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => {
            let json = serde_json::json!({ "error": err.to_string() });
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

/// Appends a trailing newline when the text lacks one.
#[must_use]
pub fn with_trailing_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        let mut owned = text.to_string();
        owned.push('\n');
        owned
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Truncates a string to at most `max_len` bytes with ellipsis, clipping
/// to a character boundary so multi-byte content never splits.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s[..find_char_boundary(s, max_len)].to_string()
    } else {
        format!("{}...", &s[..find_char_boundary(s, max_len - 3)])
    }
}
