//! Protected-span scanner.
//!
//! A single left-to-right pass that splits text into alternating normal and
//! protected segments. Protected segments (fenced code blocks, inline code
//! spans, URLs) are exempt from every correction; the stages transform the
//! normal segments and restore protected ones byte for byte.
//!
//! Span rules:
//!
//! - A backtick run of length 3 or more opens a fence. It closes at the next
//!   backtick run of length 3 or more, or at end of input (an unterminated
//!   fence protects everything after it).
//! - A backtick run of length 1 or 2 opens an inline code span only when a
//!   run of exactly the same length occurs later on the same line; otherwise
//!   the run is literal text. Inline spans never cross a line break.
//! - A URL span starts at a configured scheme prefix (ASCII case-insensitive)
//!   and extends to the next ASCII whitespace or end of input.

use std::ops::Range;

/// Minimum backtick run length that opens a fence.
const FENCE_RUN: usize = 3;

/// Classification of a scanned segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Plain text, subject to correction.
    Normal,
    /// Fenced code block, including its backtick delimiters.
    Fence,
    /// Inline code span, including its backtick delimiters.
    InlineCode,
    /// URL, from scheme prefix to the next whitespace.
    Url,
}

impl SegmentKind {
    /// Returns whether this kind is exempt from correction.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// A contiguous byte range of the input with one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Byte range in the scanned text.
    pub range: Range<usize>,
    /// Segment classification.
    pub kind: SegmentKind,
}

impl Segment {
    /// Returns whether this segment is exempt from correction.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        self.kind.is_protected()
    }
}

/// Scans `text` into segments whose concatenation is exactly `text`.
///
/// Segments are returned in order and never overlap. Adjacent segments
/// always differ in protection, so a normal segment is a maximal
/// unprotected run.
///
/// # Examples
///
/// ```
/// use textmend::pipeline::scanner::{scan, SegmentKind};
///
/// let segments = scan("see `x` here", &["http://".to_string()]);
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].kind, SegmentKind::InlineCode);
/// ```
#[must_use]
pub fn scan(text: &str, url_schemes: &[String]) -> Vec<Segment> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut normal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'`' {
            let run = backtick_run_len(bytes, i);
            if run >= FENCE_RUN {
                let end = find_fence_end(bytes, i + run);
                push_normal(&mut segments, normal_start, i);
                segments.push(Segment {
                    range: i..end,
                    kind: SegmentKind::Fence,
                });
                i = end;
                normal_start = end;
            } else if let Some(close) = find_inline_close(bytes, i + run, run) {
                let end = close + run;
                push_normal(&mut segments, normal_start, i);
                segments.push(Segment {
                    range: i..end,
                    kind: SegmentKind::InlineCode,
                });
                i = end;
                normal_start = end;
            } else {
                // Unpaired run stays literal
                i += run;
            }
        } else if let Some(scheme_len) = match_scheme(bytes, i, url_schemes) {
            let end = find_url_end(bytes, i + scheme_len);
            push_normal(&mut segments, normal_start, i);
            segments.push(Segment {
                range: i..end,
                kind: SegmentKind::Url,
            });
            i = end;
            normal_start = end;
        } else {
            i += 1;
        }
    }

    push_normal(&mut segments, normal_start, bytes.len());
    segments
}

fn push_normal(segments: &mut Vec<Segment>, start: usize, end: usize) {
    if start < end {
        segments.push(Segment {
            range: start..end,
            kind: SegmentKind::Normal,
        });
    }
}

/// Returns the length of the backtick run starting at `pos`.
fn backtick_run_len(bytes: &[u8], pos: usize) -> usize {
    let mut len = 0;
    while pos + len < bytes.len() && bytes[pos + len] == b'`' {
        len += 1;
    }
    len
}

/// Returns the end of a fence whose delimiter ended at `from`: one past the
/// closing run, or end of input for an unterminated fence.
fn find_fence_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let run = backtick_run_len(bytes, i);
            if run >= FENCE_RUN {
                return i + run;
            }
            i += run;
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Finds the start of a backtick run of exactly `open_len` before the next
/// line break. Runs of other lengths are skipped over.
fn find_inline_close(bytes: &[u8], from: usize, open_len: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' | b'\r' => return None,
            b'`' => {
                let run = backtick_run_len(bytes, i);
                if run == open_len {
                    return Some(i);
                }
                i += run;
            }
            _ => i += 1,
        }
    }
    None
}

/// Returns the scheme length when one of `schemes` starts at `pos`.
fn match_scheme(bytes: &[u8], pos: usize, schemes: &[String]) -> Option<usize> {
    schemes.iter().map(String::as_bytes).find_map(|scheme| {
        let end = pos.checked_add(scheme.len())?;
        (end <= bytes.len() && bytes[pos..end].eq_ignore_ascii_case(scheme)).then_some(scheme.len())
    })
}

/// Returns the end of a URL span that started before `from`.
fn find_url_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}
