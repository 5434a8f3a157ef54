//! Source clean-up applied before markdown parsing.
//!
//! Inline math needs no help here: the parser runs with the math extension, so
//! `$…$` reaches the span tree verbatim. Display math spanning several lines
//! does need it, because block parsing runs first and a row such as `+ b` or
//! `# x` would otherwise open a list or a heading in the middle of the block.

use regex::Regex;
use std::sync::OnceLock;

const FRONTMATTER_FENCE: &str = "---";
const MATH_FENCE: &str = "$$";
/// Enough indentation that a line can no longer open any markdown block.
const SHIELD: &str = "    ";

/// Drop a leading `---` … `---` front-matter block.
///
/// Text that does not open with a fence line, or never closes it, is returned
/// unchanged.
pub fn truncated_frontmatter(text: &str) -> String {
    let mut lines = text.split('\n');
    if lines.next() != Some(FRONTMATTER_FENCE) {
        return text.to_string();
    }
    let mut consumed = FRONTMATTER_FENCE.len() + 1;
    for line in lines.by_ref() {
        consumed += line.len() + 1;
        if line == FRONTMATTER_FENCE {
            return text.get(consumed..).unwrap_or_default().to_string();
        }
    }
    text.to_string()
}

/// Indentation and block quote markers in front of a line's content.
fn container_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[ \t]*(?:>[ \t]?)*").expect("container prefix regex should be valid")
    })
}

fn list_marker() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[-+*]|\d{1,9}[.)])[ \t]+").expect("list marker regex should be valid")
    })
}

fn split_prefix(line: &str) -> (&str, &str) {
    let end = container_prefix().find(line).map_or(0, |m| m.end());
    line.split_at(end)
}

fn fence_kind(content: &str) -> Option<&'static str> {
    let content = content.trim_start();
    ["```", "~~~"]
        .into_iter()
        .find(|fence| content.starts_with(fence))
}

/// For a line that opens a multi-line display math block, the width of its
/// list marker (zero without one). The content after the marker starts with
/// `$$` and does not close it again.
fn display_math_opening(content: &str) -> Option<usize> {
    let marker = list_marker().find(content).map_or(0, |m| m.end());
    let rest = &content[marker..];
    (rest.starts_with(MATH_FENCE) && rest.matches(MATH_FENCE).count() == 1).then_some(marker)
}

/// Indent the inner rows of every multi-line `$$` block so that block parsing
/// keeps them in one paragraph.
///
/// The shield goes after the line's container prefix, so rows inside list
/// items and block quotes stay in their container. Rows of a block opened on a
/// list item line are also padded by the marker's width. Fenced code is
/// skipped. A blank line ends a block that was never closed. Line breaks are
/// preserved.
pub fn shielded_display_math(text: &str) -> String {
    let mut out = Vec::new();
    let mut fence: Option<&'static str> = None;
    // Indentation added to each row of the open math block.
    let mut shield: Option<String> = None;

    for line in text.split('\n') {
        let (prefix, content) = split_prefix(line);

        if let Some(pad) = &shield {
            if content.trim().is_empty() || content.contains(MATH_FENCE) {
                out.push(line.to_string());
                shield = None;
            } else {
                out.push(format!("{prefix}{pad}{content}"));
            }
            continue;
        }

        match (fence, fence_kind(content)) {
            (Some(open), Some(kind)) if open == kind => fence = None,
            (None, Some(kind)) => fence = Some(kind),
            (None, None) => {
                shield = display_math_opening(content)
                    .map(|marker| format!("{SHIELD}{}", " ".repeat(marker)));
            }
            _ => {}
        }
        out.push(line.to_string());
    }
    out.join("\n")
}

/// Both clean-up passes, in the order the converter applies them.
pub fn preprocess(text: &str) -> String {
    shielded_display_math(&truncated_frontmatter(text))
}
