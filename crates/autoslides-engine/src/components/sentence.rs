use std::fmt;

use super::Component;
use crate::parsing::SpanNode;

/// A rendered line of text, optionally decorated with the phrases that were
/// strong or emphasized in the source.
///
/// Decorations nest: a sentence with both strong and emphasized phrases is
/// `Strong { inner: Emphasized { inner: Plain(..), .. }, .. }`. Every layer
/// renders as the innermost plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentence {
    Plain(String),
    Strong {
        inner: Box<Sentence>,
        parts: Vec<Sentence>,
    },
    Emphasized {
        inner: Box<Sentence>,
        parts: Vec<Sentence>,
    },
}

impl Sentence {
    pub fn plain(text: impl Into<String>) -> Self {
        Sentence::Plain(text.into())
    }

    /// The rendered markdown of this sentence.
    pub fn text(&self) -> &str {
        match self {
            Sentence::Plain(text) => text,
            Sentence::Strong { inner, .. } | Sentence::Emphasized { inner, .. } => inner.text(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Every strong or emphasized phrase at any nesting depth.
    ///
    /// Order: the inner sentence's parts, then this layer's direct parts, then
    /// the parts nested inside each direct part.
    pub fn important_parts(&self) -> Vec<&Sentence> {
        match self {
            Sentence::Plain(_) => Vec::new(),
            Sentence::Strong { inner, parts } | Sentence::Emphasized { inner, parts } => {
                let mut all = inner.important_parts();
                all.extend(parts.iter());
                all.extend(parts.iter().flat_map(Sentence::important_parts));
                all
            }
        }
    }
}

impl Default for Sentence {
    fn default() -> Self {
        Sentence::Plain(String::new())
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Component for Sentence {
    fn size(&self) -> usize {
        self.text().chars().count()
    }
}

/// Collapse a run of inline spans into one [`Sentence`].
///
/// Emphasis and strong spans are collapsed recursively into their own
/// sentences and recorded as important parts; the text of all spans is
/// concatenated in order.
pub fn collapse(spans: &[SpanNode]) -> Sentence {
    let mut emphasized = Vec::new();
    let mut strong = Vec::new();
    let mut text = String::new();

    for span in spans {
        match span {
            SpanNode::Emphasis(children) => emphasized.push(collapse(children)),
            SpanNode::Strong(children) => strong.push(collapse(children)),
            _ => {}
        }
        text.push_str(&span.to_string());
    }

    let mut sentence = Sentence::Plain(text);
    if !emphasized.is_empty() {
        sentence = Sentence::Emphasized {
            inner: Box::new(sentence),
            parts: emphasized,
        };
    }
    if !strong.is_empty() {
        sentence = Sentence::Strong {
            inner: Box::new(sentence),
            parts: strong,
        };
    }
    sentence
}
