//! Duplication correction.
//!
//! The second pipeline stage, targeting two generation artifacts:
//!
//! - Stuttered characters: inside alphabetic runs, a character repeated
//!   three or more times reduces to two copies when its lowercase form is
//!   on the doubled-letter allow list, otherwise to one. Digit,
//!   punctuation, and emoji runs are never touched.
//! - Stuttered words: immediately adjacent tokens that are
//!   case-insensitively identical and separated only by whitespace
//!   collapse to the first occurrence, keeping its casing. Intervening
//!   punctuation attaches to its token and blocks the collapse, as does
//!   any protected span.
//!
//! Both rules skip protected spans, and the whole stage is idempotent.

use crate::core::PipelineConfig;
use crate::pipeline::scanner::scan;

/// Corrects character and word duplication artifacts.
///
/// Total over Unicode strings and idempotent: running it twice gives the
/// same result as running it once.
///
/// # Examples
///
/// ```
/// use textmend::core::PipelineConfig;
/// use textmend::pipeline::dedupe;
///
/// let config = PipelineConfig::new();
/// assert_eq!(dedupe("Helllo wooorld!!!", &config), "Hello world!!!");
/// assert_eq!(dedupe("the the model", &config), "the model");
/// ```
#[must_use]
pub fn dedupe(text: &str, config: &PipelineConfig) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in scan(text, &config.url_schemes) {
        let slice = &text[segment.range.clone()];
        if segment.is_protected() {
            out.push_str(slice);
        } else {
            let squeezed = squeeze_char_runs(slice, config);
            out.push_str(&collapse_adjacent_words(&squeezed));
        }
    }
    out
}

/// Reduces alphabetic characters repeated three or more times in a row.
///
/// Repetition is case-sensitive, so `aaA` is a run of two plus one.
fn squeeze_char_runs(segment: &str, config: &PipelineConfig) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        let keep = if run >= 3 && c.is_alphabetic() {
            if config.allows_double(c) { 2 } else { 1 }
        } else {
            run
        };
        for _ in 0..keep {
            out.push(c);
        }
    }
    out
}

/// Collapses runs of adjacent case-insensitively identical tokens.
///
/// Tokens are maximal non-whitespace runs. Only plain words take part, so
/// `5 5` and `Yes. Yes.` survive. Collapsing keeps the first occurrence and
/// drops the separator before each removed repeat, which may join two
/// lines.
fn collapse_adjacent_words(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut prev_word: Option<&str> = None;
    let mut pending_sep = "";
    let mut rest = segment;

    while !rest.is_empty() {
        let run_len = leading_run_len(rest);
        let (run, tail) = rest.split_at(run_len);
        rest = tail;

        if run.starts_with(char::is_whitespace) {
            if prev_word.is_some() {
                pending_sep = run;
            } else {
                out.push_str(run);
            }
        } else if prev_word.is_some_and(|prev| is_repeat(prev, run)) {
            // Drop the repeat and the separator before it
            pending_sep = "";
        } else {
            out.push_str(pending_sep);
            pending_sep = "";
            out.push_str(run);
            prev_word = Some(run);
        }
    }

    out.push_str(pending_sep);
    out
}

/// Returns the byte length of the leading whitespace or non-whitespace run.
fn leading_run_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    let Some((_, first)) = chars.next() else {
        return 0;
    };
    let in_ws = first.is_whitespace();
    chars
        .find(|&(_, c)| c.is_whitespace() != in_ws)
        .map_or(s.len(), |(pos, _)| pos)
}

/// Returns whether `token` is a case-insensitive repeat of `prev`.
///
/// Attached sentence punctuation makes a token ineligible, which is what
/// keeps `Yes. Yes.` intact.
fn is_repeat(prev: &str, token: &str) -> bool {
    is_word_like(token) && token.to_lowercase() == prev.to_lowercase()
}

/// Returns whether a token is a plain word: at least one alphabetic
/// character, and nothing but alphanumerics, apostrophes, and hyphens.
fn is_word_like(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .all(|c| c.is_alphanumeric() || c == '\'' || c == '-')
}
