//! Markdown parsing module that turns raw text into the read-only node tree
//! the slide engine consumes.
//!
//! Tokenizing is delegated to `pulldown-cmark`; this module only folds its
//! event stream into owned [`BlockNode`] / [`SpanNode`] trees.

pub mod types;

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

pub use types::{BlockNode, ColumnAlign, ItemNode, ParagraphNode, SpanNode};

/// Parse markdown text into its top-level block nodes, in document order.
///
/// Tables, strikethrough, footnotes and math are enabled on top of CommonMark.
/// Math runs come back as plain `$…$` / `$$…$$` text, untouched by escapes or
/// emphasis. Tight list items have their inline content wrapped in an implicit
/// paragraph so every item child is a block.
pub fn parse_document(source: &str) -> Vec<BlockNode> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_MATH;
    let parser = Parser::new_ext(source, options);
    let mut processor = MarkdownProcessor::new(source);

    for (event, range) in parser.into_offset_iter() {
        processor.process_event(event, range);
    }

    processor.finalize()
}

/// Inline containers that collect spans until their end tag.
#[derive(Debug)]
enum InlineKind {
    Emphasis,
    Strong,
    Strikethrough,
    Link { dest: String, title: String },
    Image { src: String, title: String },
}

/// One open container on the processor's stack.
///
/// Every `Start` event pushes exactly one frame and every `End` event pops one,
/// so nesting in the event stream maps directly onto the stack.
#[derive(Debug)]
enum Frame {
    Paragraph {
        spans: Vec<SpanNode>,
        range: Range<usize>,
    },
    Heading {
        level: u8,
        spans: Vec<SpanNode>,
    },
    Quote {
        children: Vec<BlockNode>,
    },
    List {
        ordered: bool,
        items: Vec<ItemNode>,
    },
    Item {
        leader: String,
        children: Vec<BlockNode>,
        /// Inline content of a tight item, not yet wrapped in a paragraph.
        pending: Vec<SpanNode>,
        pending_range: Option<Range<usize>>,
    },
    CodeBlock {
        language: String,
        code: String,
    },
    Table {
        alignments: Vec<ColumnAlign>,
        header: Vec<Vec<SpanNode>>,
        rows: Vec<Vec<Vec<SpanNode>>>,
    },
    TableHead {
        cells: Vec<Vec<SpanNode>>,
    },
    TableRow {
        cells: Vec<Vec<SpanNode>>,
    },
    TableCell {
        spans: Vec<SpanNode>,
    },
    Inline {
        kind: InlineKind,
        spans: Vec<SpanNode>,
    },
    HtmlBlock {
        html: String,
        offset: usize,
    },
    Footnote {
        label: String,
        offset: usize,
        children: Vec<BlockNode>,
    },
    /// A construct we do not model; its spans are handed to the parent.
    Transparent {
        spans: Vec<SpanNode>,
    },
}

struct MarkdownProcessor<'a> {
    source: &'a str,
    /// Completed top-level blocks.
    blocks: Vec<BlockNode>,
    stack: Vec<Frame>,
}

impl<'a> MarkdownProcessor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            blocks: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn process_event(&mut self, event: Event, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start_tag(tag, range),
            Event::End(tag) => self.end_tag(tag, range),
            Event::Text(text) => match self.stack.last_mut() {
                Some(Frame::CodeBlock { code, .. }) => code.push_str(&text),
                Some(Frame::HtmlBlock { html, .. }) => html.push_str(&text),
                _ => self.push_span(SpanNode::Text(text.into_string()), range),
            },
            Event::Code(code) => self.push_span(SpanNode::Code(code.into_string()), range),
            Event::InlineMath(math) => self.push_span(SpanNode::Text(format!("${math}$")), range),
            Event::DisplayMath(math) => {
                self.push_span(SpanNode::Text(format!("$${math}$$")), range)
            }
            Event::Html(html) => match self.stack.last_mut() {
                Some(Frame::HtmlBlock { html: buf, .. }) => buf.push_str(&html),
                _ => self.push_span(SpanNode::Html(html.into_string()), range),
            },
            Event::InlineHtml(html) => self.push_span(SpanNode::Html(html.into_string()), range),
            Event::FootnoteReference(label) => {
                self.push_span(SpanNode::FootnoteReference(label.into_string()), range)
            }
            Event::SoftBreak => self.push_span(SpanNode::SoftBreak, range),
            Event::HardBreak => self.push_span(SpanNode::LineBreak, range),
            Event::Rule => self.push_block(BlockNode::ThematicBreak {
                offset: range.start,
            }),
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_span(SpanNode::Text(marker.to_string()), range)
            }
        }
    }

    fn start_tag(&mut self, tag: Tag, range: Range<usize>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph {
                spans: Vec::new(),
                range,
            },
            Tag::Heading { level, .. } => Frame::Heading {
                level: level as u8,
                spans: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::Quote {
                children: Vec::new(),
            },
            Tag::List(first_number) => Frame::List {
                ordered: first_number.is_some(),
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                leader: leader_at(self.source, range.start),
                children: Vec::new(),
                pending: Vec::new(),
                pending_range: None,
            },
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                    CodeBlockKind::Indented => String::new(),
                },
                code: String::new(),
            },
            Tag::Table(alignments) => Frame::Table {
                alignments: alignments.into_iter().map(ColumnAlign::from).collect(),
                header: Vec::new(),
                rows: Vec::new(),
            },
            Tag::TableHead => Frame::TableHead { cells: Vec::new() },
            Tag::TableRow => Frame::TableRow { cells: Vec::new() },
            Tag::TableCell => Frame::TableCell { spans: Vec::new() },
            Tag::Emphasis => Frame::inline(InlineKind::Emphasis),
            Tag::Strong => Frame::inline(InlineKind::Strong),
            Tag::Strikethrough => Frame::inline(InlineKind::Strikethrough),
            Tag::Link {
                dest_url, title, ..
            } => Frame::inline(InlineKind::Link {
                dest: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::Image {
                dest_url, title, ..
            } => Frame::inline(InlineKind::Image {
                src: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::HtmlBlock => Frame::HtmlBlock {
                html: String::new(),
                offset: range.start,
            },
            Tag::FootnoteDefinition(label) => Frame::Footnote {
                label: label.into_string(),
                offset: range.start,
                children: Vec::new(),
            },
            _ => Frame::Transparent { spans: Vec::new() },
        };
        self.stack.push(frame);
    }

    fn end_tag(&mut self, tag: TagEnd, range: Range<usize>) {
        let Some(frame) = self.stack.pop() else {
            debug_assert!(false, "{tag:?} without corresponding start");
            return;
        };

        match frame {
            Frame::Paragraph { spans, range } => {
                let source = self.paragraph_source(range);
                self.push_block(BlockNode::Paragraph(ParagraphNode { spans, source }));
            }
            Frame::Heading { level, spans } => {
                self.push_block(BlockNode::Heading { level, spans });
            }
            Frame::Quote { children } => self.push_block(BlockNode::Quote(children)),
            Frame::List { ordered, items } => {
                self.push_block(BlockNode::List { ordered, items });
            }
            Frame::Item {
                leader,
                mut children,
                pending,
                pending_range,
            } => {
                if let Some(paragraph) = self.implicit_paragraph(pending, pending_range) {
                    children.push(paragraph);
                }
                let item = ItemNode { leader, children };
                match self.stack.last_mut() {
                    Some(Frame::List { items, .. }) => items.push(item),
                    _ => self.push_block(BlockNode::Item(item)),
                }
            }
            Frame::CodeBlock { language, code } => {
                self.push_block(BlockNode::CodeFence { language, code });
            }
            Frame::Table {
                alignments,
                header,
                rows,
            } => self.push_block(BlockNode::Table {
                alignments,
                header,
                rows,
            }),
            Frame::TableHead { cells } => {
                if let Some(Frame::Table { header, .. }) = self.stack.last_mut() {
                    *header = cells;
                }
            }
            Frame::TableRow { cells } => {
                if let Some(Frame::Table { rows, .. }) = self.stack.last_mut() {
                    rows.push(cells);
                }
            }
            Frame::TableCell { spans } => match self.stack.last_mut() {
                Some(Frame::TableHead { cells }) | Some(Frame::TableRow { cells }) => {
                    cells.push(spans)
                }
                _ => log::debug!("table cell outside of a table row"),
            },
            Frame::Inline { kind, spans } => {
                let span = match kind {
                    InlineKind::Emphasis => SpanNode::Emphasis(spans),
                    InlineKind::Strong => SpanNode::Strong(spans),
                    InlineKind::Strikethrough => SpanNode::Strikethrough(spans),
                    InlineKind::Link { dest, title } => SpanNode::Link {
                        dest,
                        title,
                        children: spans,
                    },
                    InlineKind::Image { src, title } => SpanNode::Image {
                        src,
                        title,
                        alt: spans,
                    },
                };
                self.push_span(span, range);
            }
            Frame::HtmlBlock { html, offset } => {
                self.push_block(BlockNode::Html { html, offset });
            }
            Frame::Footnote {
                label,
                offset,
                children,
            } => self.push_block(BlockNode::FootnoteDefinition {
                label,
                offset,
                children,
            }),
            Frame::Transparent { spans } => {
                for span in spans {
                    self.push_span(span, range.clone());
                }
            }
        }
    }

    /// Add an inline span to the innermost frame that collects inlines.
    fn push_span(&mut self, span: SpanNode, range: Range<usize>) {
        match self.stack.last_mut() {
            Some(
                Frame::Paragraph { spans, .. }
                | Frame::Heading { spans, .. }
                | Frame::TableCell { spans }
                | Frame::Inline { spans, .. }
                | Frame::Transparent { spans },
            ) => append_span(spans, span),
            Some(Frame::Item {
                pending,
                pending_range,
                ..
            }) => {
                append_span(pending, span);
                *pending_range = Some(match pending_range.take() {
                    Some(r) => r.start.min(range.start)..r.end.max(range.end),
                    None => range,
                });
            }
            _ => log::debug!("dropping inline span outside of an inline container: {span:?}"),
        }
    }

    /// Add a completed block to the innermost container that holds blocks.
    fn push_block(&mut self, block: BlockNode) {
        let container = self.stack.iter().rposition(|frame| {
            matches!(
                frame,
                Frame::Quote { .. } | Frame::Item { .. } | Frame::Footnote { .. }
            )
        });
        let Some(index) = container else {
            self.blocks.push(block);
            return;
        };

        if matches!(self.stack[index], Frame::Item { .. }) {
            self.flush_item_text(index);
        }
        match &mut self.stack[index] {
            Frame::Quote { children }
            | Frame::Item { children, .. }
            | Frame::Footnote { children, .. } => children.push(block),
            _ => unreachable!("container index always points at a block container"),
        }
    }

    /// Wrap the pending inline content of a tight item into a paragraph child.
    fn flush_item_text(&mut self, index: usize) {
        let (pending, pending_range) = match &mut self.stack[index] {
            Frame::Item {
                pending,
                pending_range,
                ..
            } => (std::mem::take(pending), pending_range.take()),
            _ => return,
        };
        if let Some(paragraph) = self.implicit_paragraph(pending, pending_range)
            && let Frame::Item { children, .. } = &mut self.stack[index]
        {
            children.push(paragraph);
        }
    }

    fn implicit_paragraph(
        &self,
        spans: Vec<SpanNode>,
        range: Option<Range<usize>>,
    ) -> Option<BlockNode> {
        if spans.is_empty() {
            return None;
        }
        let source = range
            .map(|range| self.paragraph_source(range))
            .unwrap_or_else(|| spans.iter().map(ToString::to_string).collect());
        Some(BlockNode::Paragraph(ParagraphNode { spans, source }))
    }

    /// Source text of a paragraph with any enclosing block quote markers removed.
    fn paragraph_source(&self, range: Range<usize>) -> String {
        let raw = self.source.get(range).unwrap_or_default();
        let quote_depth = self
            .stack
            .iter()
            .filter(|frame| matches!(frame, Frame::Quote { .. }))
            .count();
        if quote_depth == 0 {
            return raw.to_string();
        }
        raw.lines()
            .map(|line| strip_quote_markers(line, quote_depth))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Finalize processing and return all top-level blocks.
    fn finalize(mut self) -> Vec<BlockNode> {
        debug_assert!(self.stack.is_empty(), "unbalanced event stream");
        // Recover whatever is still open rather than losing content.
        while !self.stack.is_empty() {
            self.end_tag(TagEnd::Paragraph, 0..0);
        }
        self.blocks
    }
}

impl Frame {
    fn inline(kind: InlineKind) -> Self {
        Frame::Inline {
            kind,
            spans: Vec::new(),
        }
    }
}

/// Push a span, merging adjacent text so escapes and entity boundaries do not
/// fragment a run of plain text.
fn append_span(spans: &mut Vec<SpanNode>, span: SpanNode) {
    if let (Some(SpanNode::Text(last)), SpanNode::Text(text)) = (spans.last_mut(), &span) {
        last.push_str(text);
        return;
    }
    spans.push(span);
}

/// The list marker found at `offset`, e.g. `-` or `12.`.
fn leader_at(source: &str, offset: usize) -> String {
    source
        .get(offset..)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or("-")
        .to_string()
}

fn strip_quote_markers(line: &str, depth: usize) -> &str {
    let mut rest = line;
    for _ in 0..depth {
        let trimmed = rest.trim_start();
        match trimmed.strip_prefix('>') {
            Some(after) => rest = after.strip_prefix(' ').unwrap_or(after),
            None => break,
        }
    }
    rest
}
