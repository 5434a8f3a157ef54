use std::fmt;

/// Column alignment of a table, as declared by the delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnAlign {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl ColumnAlign {
    /// The delimiter-row cell used when re-emitting a table, including the trailing pipe.
    pub fn delimiter_cell(self) -> &'static str {
        match self {
            ColumnAlign::None => "-----|",
            ColumnAlign::Left => ":----|",
            ColumnAlign::Center => ":---:|",
            ColumnAlign::Right => "----:|",
        }
    }
}

impl From<pulldown_cmark::Alignment> for ColumnAlign {
    fn from(align: pulldown_cmark::Alignment) -> Self {
        match align {
            pulldown_cmark::Alignment::None => ColumnAlign::None,
            pulldown_cmark::Alignment::Left => ColumnAlign::Left,
            pulldown_cmark::Alignment::Center => ColumnAlign::Center,
            pulldown_cmark::Alignment::Right => ColumnAlign::Right,
        }
    }
}

/// An inline node of a parsed document.
///
/// `Display` renders the node back to markdown, which is the textual form
/// slides are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanNode {
    /// Literal text with markdown escapes already resolved.
    Text(String),
    /// An inline code span (content without backticks).
    Code(String),
    Emphasis(Vec<SpanNode>),
    Strong(Vec<SpanNode>),
    Strikethrough(Vec<SpanNode>),
    Link {
        dest: String,
        title: String,
        children: Vec<SpanNode>,
    },
    Image {
        src: String,
        title: String,
        alt: Vec<SpanNode>,
    },
    /// Raw inline HTML, passed through untouched.
    Html(String),
    FootnoteReference(String),
    /// A plain newline inside a paragraph.
    SoftBreak,
    /// A hard line break (trailing double space or backslash).
    LineBreak,
}

impl SpanNode {
    /// Returns the literal text if this is a [`SpanNode::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SpanNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this span separates lines of a paragraph.
    pub fn is_break(&self) -> bool {
        matches!(self, SpanNode::SoftBreak | SpanNode::LineBreak)
    }
}

fn write_spans(f: &mut fmt::Formatter<'_>, spans: &[SpanNode]) -> fmt::Result {
    spans.iter().try_for_each(|span| write!(f, "{span}"))
}

fn write_destination(f: &mut fmt::Formatter<'_>, dest: &str, title: &str) -> fmt::Result {
    if title.is_empty() {
        write!(f, "({dest})")
    } else {
        write!(f, "({dest} \"{title}\")")
    }
}

impl fmt::Display for SpanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanNode::Text(text) | SpanNode::Html(text) => f.write_str(text),
            SpanNode::Code(code) => {
                // Content containing a backtick needs a longer fence.
                if code.contains('`') {
                    write!(f, "`` {code} ``")
                } else {
                    write!(f, "`{code}`")
                }
            }
            SpanNode::Emphasis(children) => {
                f.write_str("*")?;
                write_spans(f, children)?;
                f.write_str("*")
            }
            SpanNode::Strong(children) => {
                f.write_str("**")?;
                write_spans(f, children)?;
                f.write_str("**")
            }
            SpanNode::Strikethrough(children) => {
                f.write_str("~~")?;
                write_spans(f, children)?;
                f.write_str("~~")
            }
            SpanNode::Link {
                dest,
                title,
                children,
            } => {
                f.write_str("[")?;
                write_spans(f, children)?;
                f.write_str("]")?;
                write_destination(f, dest, title)
            }
            SpanNode::Image { src, title, alt } => {
                f.write_str("![")?;
                write_spans(f, alt)?;
                f.write_str("]")?;
                write_destination(f, src, title)
            }
            SpanNode::FootnoteReference(label) => write!(f, "[^{label}]"),
            SpanNode::SoftBreak | SpanNode::LineBreak => f.write_str(" "),
        }
    }
}

/// A paragraph: its inline spans plus the markdown source it was parsed from.
///
/// The source is kept because math blocks need the TeX exactly as written,
/// before markdown escape processing folds `\\` into `\`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphNode {
    pub spans: Vec<SpanNode>,
    pub source: String,
}

/// One item of a list: its marker and its child blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNode {
    /// The literal marker, e.g. `-`, `*`, `1.` or `3)`.
    pub leader: String,
    pub children: Vec<BlockNode>,
}

/// A block node of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Heading {
        level: u8,
        spans: Vec<SpanNode>,
    },
    Paragraph(ParagraphNode),
    List {
        ordered: bool,
        items: Vec<ItemNode>,
    },
    Item(ItemNode),
    CodeFence {
        /// Info string of the fence; empty for indented code.
        language: String,
        code: String,
    },
    Quote(Vec<BlockNode>),
    Table {
        alignments: Vec<ColumnAlign>,
        header: Vec<Vec<SpanNode>>,
        rows: Vec<Vec<Vec<SpanNode>>>,
    },
    ThematicBreak {
        offset: usize,
    },
    Html {
        html: String,
        offset: usize,
    },
    FootnoteDefinition {
        label: String,
        offset: usize,
        children: Vec<BlockNode>,
    },
}

impl BlockNode {
    /// Short human-readable name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockNode::Heading { .. } => "heading",
            BlockNode::Paragraph(_) => "paragraph",
            BlockNode::List { .. } => "list",
            BlockNode::Item(_) => "list item",
            BlockNode::CodeFence { .. } => "code fence",
            BlockNode::Quote(_) => "block quote",
            BlockNode::Table { .. } => "table",
            BlockNode::ThematicBreak { .. } => "thematic break",
            BlockNode::Html { .. } => "html block",
            BlockNode::FootnoteDefinition { .. } => "footnote definition",
        }
    }

    /// Source byte offset for the node kinds that record one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            BlockNode::ThematicBreak { offset }
            | BlockNode::Html { offset, .. }
            | BlockNode::FootnoteDefinition { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SpanNode {
        SpanNode::Text(s.to_string())
    }

    #[test]
    fn test_nested_decorations_render_as_markdown() {
        let span = SpanNode::Strong(vec![
            text("bold "),
            SpanNode::Emphasis(vec![text("and italic")]),
        ]);
        assert_eq!(span.to_string(), "**bold *and italic***");
    }

    #[test]
    fn test_image_with_title_renders_title() {
        let span = SpanNode::Image {
            src: "cat.png".to_string(),
            title: "A cat".to_string(),
            alt: vec![text("cat")],
        };
        assert_eq!(span.to_string(), "![cat](cat.png \"A cat\")");
    }

    #[test]
    fn test_code_span_with_backtick_uses_double_fence() {
        assert_eq!(SpanNode::Code("a`b".to_string()).to_string(), "`` a`b ``");
        assert_eq!(SpanNode::Code("ab".to_string()).to_string(), "`ab`");
    }

    #[test]
    fn test_alignment_delimiters() {
        assert_eq!(ColumnAlign::None.delimiter_cell(), "-----|");
        assert_eq!(ColumnAlign::Center.delimiter_cell(), ":---:|");
        assert_eq!(ColumnAlign::Right.delimiter_cell(), "----:|");
    }
}
