//! Paragraph → sentence decomposition.
//!
//! A paragraph is cut into one sentence per `". "` and per line break. Inline
//! math (`$…$`) is a raw zone: it is masked before splitting and restored
//! afterwards, so `$x. y$` never becomes two sentences.

use std::sync::OnceLock;

use regex::Regex;

use super::sentence::{Sentence, collapse};
use crate::parsing::SpanNode;

const SENTENCE_DELIMITER: &str = ". ";

/// Stand-in for an inline math run while splitting; cannot contain `". "`.
const MATH_PLACEHOLDER: &str = "\u{FFFC}";

fn inline_math() -> &'static Regex {
    static INLINE_MATH: OnceLock<Regex> = OnceLock::new();
    INLINE_MATH.get_or_init(|| Regex::new(r"\$.*?\$").expect("Invalid inline math regex"))
}

/// A piece of plain text after sentence splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delimited {
    /// Text of a sentence; a fragment that ended a sentence keeps its period.
    Text(String),
    /// The boundary between two sentences.
    SentenceEnd,
}

/// Split plain text at `". "` into fragments and sentence boundaries, leaving
/// inline math untouched.
///
/// Fragments after a boundary have their leading whitespace removed; an empty
/// trailing fragment is dropped.
pub fn delimited_text(text: &str) -> Vec<Delimited> {
    let math_runs: Vec<&str> = inline_math().find_iter(text).map(|m| m.as_str()).collect();
    let masked = inline_math().replace_all(text, MATH_PLACEHOLDER);
    let mut runs = math_runs.into_iter();

    let pieces: Vec<&str> = masked.split(SENTENCE_DELIMITER).collect();
    let last = pieces.len() - 1;
    let mut out = Vec::with_capacity(pieces.len() * 2);

    for (i, piece) in pieces.into_iter().enumerate() {
        let piece = if i == 0 { piece } else { piece.trim_start() };
        let restored = restore_math(piece, &mut runs);
        if i < last {
            out.push(Delimited::Text(format!("{restored}.")));
            out.push(Delimited::SentenceEnd);
        } else if !restored.is_empty() {
            out.push(Delimited::Text(restored));
        }
    }
    out
}

/// Substitute math runs back into a fragment, one per placeholder, in order.
fn restore_math<'a>(fragment: &str, runs: &mut impl Iterator<Item = &'a str>) -> String {
    let mut pieces = fragment.split(MATH_PLACEHOLDER);
    let mut restored = pieces.next().unwrap_or_default().to_string();
    for piece in pieces {
        restored.push_str(runs.next().unwrap_or_default());
        restored.push_str(piece);
    }
    restored
}

/// Group a paragraph's spans into one span list per sentence or line.
///
/// Sentence ends inside text spans, soft breaks and hard breaks all close the
/// current group. Empty groups are dropped.
pub fn decompose(spans: &[SpanNode]) -> Vec<Vec<SpanNode>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();

    fn flush(groups: &mut Vec<Vec<SpanNode>>, current: &mut Vec<SpanNode>) {
        if !current.is_empty() {
            groups.push(std::mem::take(current));
        }
    }

    for span in spans {
        match span {
            SpanNode::Text(text) => {
                for piece in delimited_text(text) {
                    match piece {
                        Delimited::Text(text) => current.push(SpanNode::Text(text)),
                        Delimited::SentenceEnd => flush(&mut groups, &mut current),
                    }
                }
            }
            span if span.is_break() => flush(&mut groups, &mut current),
            span => current.push(span.clone()),
        }
    }
    flush(&mut groups, &mut current);
    groups
}

/// Decompose a paragraph's spans and collapse each group into a [`Sentence`].
pub fn sentences(spans: &[SpanNode]) -> Vec<Sentence> {
    decompose(spans).iter().map(|group| collapse(group)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> SpanNode {
        SpanNode::Text(s.to_string())
    }

    fn sentence_texts(spans: &[SpanNode]) -> Vec<String> {
        sentences(spans)
            .iter()
            .map(|s| s.text().to_string())
            .collect()
    }

    #[test]
    fn test_two_sentences_with_inline_math() {
        let spans = [text("First sentence. Second sentence with $a_1 < a_2$. ")];

        assert_eq!(
            sentence_texts(&spans),
            vec!["First sentence.", "Second sentence with $a_1 < a_2$."]
        );
    }

    #[test]
    fn test_period_space_inside_math_is_not_a_boundary() {
        let spans = [text("See $x. y$ here. Then $z$ and $w. v$ end")];

        assert_eq!(
            sentence_texts(&spans),
            vec!["See $x. y$ here.", "Then $z$ and $w. v$ end"]
        );
    }

    #[rstest]
    #[case("", vec![])]
    #[case("one", vec![Delimited::Text("one".to_string())])]
    #[case(
        "a. b",
        vec![
            Delimited::Text("a.".to_string()),
            Delimited::SentenceEnd,
            Delimited::Text("b".to_string()),
        ]
    )]
    #[case(
        "a.  ",
        vec![Delimited::Text("a.".to_string()), Delimited::SentenceEnd]
    )]
    fn delimited_text_cases(#[case] input: &str, #[case] expected: Vec<Delimited>) {
        assert_eq!(delimited_text(input), expected);
    }

    #[test]
    fn test_line_breaks_delimit_sentences() {
        let spans = [
            text("first line"),
            SpanNode::SoftBreak,
            text("second"),
            SpanNode::LineBreak,
            text("third"),
        ];

        assert_eq!(sentence_texts(&spans), vec!["first line", "second", "third"]);
    }

    #[test]
    fn test_decorations_stay_with_their_sentence() {
        let spans = [
            text("Plain start. Then "),
            SpanNode::Strong(vec![text("bold")]),
            text(" words. Last"),
        ];

        let sentences = sentences(&spans);
        assert_eq!(sentences.len(), 3);
        assert!(sentences[0].important_parts().is_empty());
        assert_eq!(sentences[1].text(), "Then **bold** words.");
        assert_eq!(sentences[1].important_parts()[0].text(), "bold");
        assert_eq!(sentences[2].text(), "Last");
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let spans = [
            text("Ends here. "),
            SpanNode::SoftBreak,
            SpanNode::SoftBreak,
        ];

        assert_eq!(decompose(&spans), vec![vec![text("Ends here.")]]);
    }
}
