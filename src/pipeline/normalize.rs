//! Whitespace and control-character normalization.
//!
//! The first pipeline stage. Unifies line endings, strips non-printable
//! characters, collapses space and tab runs, and trims trailing whitespace
//! per line. Protected spans pass through byte for byte, so fenced code
//! keeps its exact indentation and line endings.

use crate::core::PipelineConfig;
use crate::pipeline::scanner::scan;

/// Invisible characters removed outside protected spans.
///
/// Zero-width joiners are kept so emoji sequences survive.
const STRIPPED: &[char] = &['\u{FEFF}', '\u{200B}', '\u{00AD}'];

/// Normalizes whitespace and strips non-printable characters.
///
/// Total over Unicode strings; the output is never longer than the input.
///
/// # Examples
///
/// ```
/// use textmend::core::PipelineConfig;
/// use textmend::pipeline::normalize;
///
/// let config = PipelineConfig::new();
/// assert_eq!(normalize("a   b\t\tc", &config), "a b c");
/// assert_eq!(normalize("keep\nnewlines", &config), "keep\nnewlines");
/// ```
#[must_use]
pub fn normalize(text: &str, config: &PipelineConfig) -> String {
    let mut out = String::with_capacity(text.len());
    let mut tail_floor = None;
    for segment in scan(text, &config.url_schemes) {
        let slice = &text[segment.range.clone()];
        if segment.is_protected() {
            out.push_str(slice);
            tail_floor = None;
        } else {
            let floor = out.len();
            normalize_segment(slice, &mut out);
            tail_floor = Some(floor);
        }
    }
    // End of input ends the last line, so its trailing spaces go too
    if let Some(floor) = tail_floor {
        while out.len() > floor && out.ends_with(' ') {
            out.pop();
        }
    }
    out
}

/// Normalizes one unprotected segment into `out`.
///
/// Runs of spaces and tabs become a single space, carriage returns fold
/// into line feeds, control and zero-width characters are dropped, and
/// spaces directly before a line feed are removed. Trailing-space removal
/// never pops past `out`'s length at entry, so previously emitted
/// protected bytes stay intact.
fn normalize_segment(segment: &str, out: &mut String) {
    let floor = out.len();
    let mut in_space_run = false;
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' => {
                if !in_space_run {
                    out.push(' ');
                    in_space_run = true;
                }
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                push_line_feed(out, floor);
                in_space_run = false;
            }
            '\n' => {
                push_line_feed(out, floor);
                in_space_run = false;
            }
            _ if c.is_control() || STRIPPED.contains(&c) => {}
            _ => {
                out.push(c);
                in_space_run = false;
            }
        }
    }
}

/// Pushes a line feed after dropping trailing spaces emitted for the
/// current segment.
fn push_line_feed(out: &mut String, floor: usize) {
    while out.len() > floor && out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
