//! Block-level structural re-flow.
//!
//! The third pipeline stage. Rebuilds vertical structure: exactly one blank
//! line between block-level elements, exactly one newline between
//! consecutive list items, and heading or list markers de-indented to
//! column zero. Line content is never rewritten beyond that de-indent, so
//! inline emphasis markers pass through untouched. Lines belonging to a
//! fenced code block form a single verbatim block.

use crate::core::PipelineConfig;
use crate::pipeline::scanner::{SegmentKind, scan};
use std::ops::Range;

/// How a single line participates in block grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// Whitespace-only separator line.
    Blank,
    /// Line intersecting fence spans; carries the first and last
    /// intersecting scan indices.
    Code(usize, usize),
    /// `#`-prefixed heading line.
    Heading,
    /// `- ` bullet or `N. ` numbered item.
    ListItem,
    /// Anything else.
    Paragraph,
}

/// Re-flows block structure.
///
/// Total over Unicode strings and idempotent. Leading and trailing blank
/// lines of the document are dropped; paragraph-internal single newlines
/// are preserved.
///
/// # Examples
///
/// ```
/// use textmend::core::PipelineConfig;
/// use textmend::pipeline::reflow;
///
/// let config = PipelineConfig::new();
/// assert_eq!(
///     reflow("# Heading\n\n\n\nSome text", &config),
///     "# Heading\n\nSome text"
/// );
/// ```
#[must_use]
pub fn reflow(text: &str, config: &PipelineConfig) -> String {
    let fences: Vec<Range<usize>> = scan(text, &config.url_schemes)
        .into_iter()
        .filter(|s| s.kind == SegmentKind::Fence)
        .map(|s| s.range)
        .collect();

    let lines = classify_lines(text, &fences);
    let blocks = group_blocks(&lines);

    let mut out = String::with_capacity(text.len());
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        for (j, line) in block.iter().enumerate() {
            if j > 0 {
                out.push('\n');
            }
            out.push_str(line);
        }
    }
    out
}

/// Splits `text` into lines and classifies each one.
fn classify_lines<'a>(text: &'a str, fences: &[Range<usize>]) -> Vec<(&'a str, LineKind)> {
    let mut lines = Vec::new();
    let mut offset = 0;
    let mut fence_idx = 0;

    for line in text.split('\n') {
        let end = offset + line.len();
        while fence_idx < fences.len() && fences[fence_idx].end <= offset {
            fence_idx += 1;
        }
        let in_fence = fence_idx < fences.len()
            && fences[fence_idx].start < end
            && offset < fences[fence_idx].end;

        let kind = if in_fence {
            let mut last = fence_idx;
            while last + 1 < fences.len() && fences[last + 1].start < end {
                last += 1;
            }
            LineKind::Code(fence_idx, last)
        } else {
            classify(line)
        };
        lines.push((line, kind));
        offset = end + 1;
    }
    lines
}

/// Groups classified lines into blocks.
///
/// Blank lines separate blocks and are dropped, with one exception: blank
/// lines between two list items stay inside the list, which is what
/// tightens a loosely spaced list to one newline per item. Consecutive
/// fence lines stay in one block while they share a fence span, so a line
/// holding both a closing and an opening fence never gets a blank line
/// pushed after it.
fn group_blocks<'a>(lines: &[(&'a str, LineKind)]) -> Vec<Vec<&'a str>> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match lines[i].1 {
            LineKind::Blank => i += 1,
            LineKind::Heading => {
                blocks.push(vec![lines[i].0.trim_start()]);
                i += 1;
            }
            LineKind::Code(_, mut reach) => {
                let mut block = vec![lines[i].0];
                i += 1;
                while i < lines.len() {
                    let LineKind::Code(first, last) = lines[i].1 else {
                        break;
                    };
                    if first > reach {
                        break;
                    }
                    block.push(lines[i].0);
                    reach = last;
                    i += 1;
                }
                blocks.push(block);
            }
            LineKind::ListItem => {
                let mut block = Vec::new();
                loop {
                    while i < lines.len() && lines[i].1 == LineKind::ListItem {
                        block.push(lines[i].0.trim_start());
                        i += 1;
                    }
                    let mut j = i;
                    while j < lines.len() && lines[j].1 == LineKind::Blank {
                        j += 1;
                    }
                    if j > i && j < lines.len() && lines[j].1 == LineKind::ListItem {
                        i = j;
                    } else {
                        break;
                    }
                }
                blocks.push(block);
            }
            LineKind::Paragraph => {
                let mut block = Vec::new();
                while i < lines.len() && lines[i].1 == LineKind::Paragraph {
                    block.push(lines[i].0);
                    i += 1;
                }
                blocks.push(block);
            }
        }
    }
    blocks
}

fn classify(line: &str) -> LineKind {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if is_heading(trimmed) {
        LineKind::Heading
    } else if is_list_item(trimmed) {
        LineKind::ListItem
    } else {
        LineKind::Paragraph
    }
}

/// One to six `#` at line start, followed by a space or line end.
fn is_heading(trimmed: &str) -> bool {
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    (1..=6).contains(&hashes) && matches!(trimmed.as_bytes().get(hashes), None | Some(b' '))
}

/// `- ` bullet or digits followed by `. `; a bare `1.` or `1.5` is not a
/// list marker.
fn is_list_item(trimmed: &str) -> bool {
    if trimmed.starts_with("- ") {
        return true;
    }
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && trimmed[digits..].starts_with(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> String {
        reflow(text, &PipelineConfig::new())
    }

    #[test]
    fn test_reflow_empty() {
        assert_eq!(run(""), "");
    }

    #[test]
    fn test_reflow_single_paragraph() {
        assert_eq!(run("just text"), "just text");
    }

    #[test]
    fn test_reflow_collapses_blank_runs() {
        assert_eq!(run("# Heading\n\n\n\nSome text"), "# Heading\n\nSome text");
        assert_eq!(run("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_reflow_preserves_soft_newlines() {
        assert_eq!(run("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn test_reflow_separates_heading_from_text() {
        assert_eq!(run("# Title\nbody"), "# Title\n\nbody");
    }

    #[test]
    fn test_reflow_adjacent_headings() {
        assert_eq!(run("# One\n## Two"), "# One\n\n## Two");
    }

    #[test]
    fn test_reflow_deindents_heading() {
        assert_eq!(run("   ## Title"), "## Title");
        assert_eq!(run("\t# Title"), "# Title");
    }

    #[test]
    fn test_reflow_hash_without_space_is_paragraph() {
        assert_eq!(run("#tag and text\nmore"), "#tag and text\nmore");
    }

    #[test]
    fn test_reflow_seven_hashes_is_paragraph() {
        assert_eq!(run("####### deep"), "####### deep");
    }

    #[test]
    fn test_reflow_heading_without_text() {
        assert_eq!(run("##\nbody"), "##\n\nbody");
    }

    #[test]
    fn test_reflow_list_items_single_newline() {
        assert_eq!(run("- one\n\n- two\n\n\n- three"), "- one\n- two\n- three");
    }

    #[test]
    fn test_reflow_deindents_list_items() {
        assert_eq!(run("  - one\n    - two"), "- one\n- two");
    }

    #[test]
    fn test_reflow_numbered_list() {
        assert_eq!(run("1. first\n\n2. second"), "1. first\n2. second");
        assert_eq!(run("  10. tenth"), "10. tenth");
    }

    #[test]
    fn test_reflow_mixed_markers_stay_one_list() {
        assert_eq!(run("1. first\n- second"), "1. first\n- second");
    }

    #[test]
    fn test_reflow_decimal_number_is_not_list() {
        assert_eq!(run("1.5 miles away"), "1.5 miles away");
    }

    #[test]
    fn test_reflow_bare_dash_is_not_list() {
        assert_eq!(run("-\ntext"), "-\ntext");
    }

    #[test]
    fn test_reflow_list_then_paragraph() {
        assert_eq!(run("- item\nplain text"), "- item\n\nplain text");
    }

    #[test]
    fn test_reflow_list_blank_then_paragraph() {
        assert_eq!(run("- item\n\nplain text"), "- item\n\nplain text");
    }

    #[test]
    fn test_reflow_fence_block_verbatim() {
        let text = "before\n\n\n```\n  indented code\n\n\nmore  code\n```\n\n\nafter";
        assert_eq!(
            run(text),
            "before\n\n```\n  indented code\n\n\nmore  code\n```\n\nafter"
        );
    }

    #[test]
    fn test_reflow_fence_touching_text_gets_blank_lines() {
        assert_eq!(run("text\n```\ncode\n```\ntail"), "text\n\n```\ncode\n```\n\ntail");
    }

    #[test]
    fn test_reflow_adjacent_fences_stay_separate() {
        assert_eq!(run("```a```\n```b```"), "```a```\n\n```b```");
    }

    #[test]
    fn test_reflow_fences_sharing_a_line_stay_one_block() {
        // The middle line closes one fence and opens the next; no blank
        // line may land inside either fence
        let text = "```a\nb``` ```c\nd```";
        assert_eq!(run(text), text);
        assert_eq!(
            run("intro\n```a\nb``` ```c\nd```\ntail"),
            "intro\n\n```a\nb``` ```c\nd```\n\ntail"
        );
    }

    #[test]
    fn test_reflow_unterminated_fence_verbatim() {
        let text = "intro\n```\nno  closer\n\n\nstill code";
        assert_eq!(run(text), "intro\n\n```\nno  closer\n\n\nstill code");
    }

    #[test]
    fn test_reflow_list_marker_inside_fence_untouched() {
        let text = "```\n- not a list\n# not a heading\n```";
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_reflow_drops_leading_and_trailing_blanks() {
        assert_eq!(run("\n\n\na\n\n\n"), "a");
        assert_eq!(run("text\n"), "text");
    }

    #[test]
    fn test_reflow_emphasis_untouched() {
        assert_eq!(run("*italic* and **bold** stay"), "*italic* and **bold** stay");
    }

    #[test]
    fn test_reflow_whitespace_only_input() {
        assert_eq!(run(" \n\t\n  "), "");
    }

    #[test]
    fn test_reflow_idempotent() {
        let inputs = [
            "# H\n\n\ntext\n- a\n\n- b\n\n```\ncode\n```\ntail\n\n",
            "a\nb\n\n\nc",
            "  - x\n   1. y",
            "```a```\n```b```",
            "```a\nb``` ```c\nd```",
            "- one\n\n- two\nplain",
        ];
        for input in inputs {
            let once = run(input);
            assert_eq!(run(&once), once, "not idempotent on {input:?}");
        }
    }
}
