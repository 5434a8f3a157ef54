//! # Blocks
//!
//! A block is the renderable unit for one parsed node. Composite blocks own a
//! sequence of components and spread them over as many slides as their
//! height requires; headings and images always fit on one.
//!
//! ## Modules
//!
//! - **`composite`**: the `CompositeBlock` trait and the greedy `paginate`
//! - **`head`**: `Head`, the heading context every slide is rendered under
//! - **`paragraph`**, **`list`**, **`code`**, **`quote`**, **`table`**,
//!   **`math`**, **`image`**: one variant each
//!
//! ## Key Invariants
//!
//! - Every block yields at least one slide
//! - Dispatch is ordered: math, then image, then the plain paragraph
//! - Nodes with no slide rendering abort the conversion with
//!   [`ConvertError::UnsupportedNode`]

pub mod code;
pub mod composite;
pub mod head;
pub mod image;
pub mod list;
pub mod math;
pub mod paragraph;
pub mod quote;
pub mod table;

use std::fmt;

pub use code::CodeBlock;
pub use composite::{CompositeBlock, paginate};
pub use head::Head;
pub use image::ImageBlock;
pub use list::ListBlock;
pub use math::MathBlock;
pub use paragraph::ParagraphBlock;
pub use quote::QuoteBlock;
pub use table::TableBlock;

use crate::error::ConvertError;
use crate::layout::Layout;
use crate::parsing::{BlockNode, ParagraphNode, SpanNode};

/// Slide separator appended after every slide body.
pub const SLIDE_SEPARATOR: &str = "\n\n---\n\n";

const MATH_FENCE: &str = "$$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(Head),
    Paragraph(ParagraphBlock),
    List(ListBlock),
    Item(ListBlock),
    CodeFence(CodeBlock),
    Quote(QuoteBlock),
    Table(TableBlock),
    Image(ImageBlock),
    Math(MathBlock),
}

impl Block {
    pub fn height(&self, line_width: usize) -> usize {
        match self {
            Block::Heading(head) => head.height(),
            Block::Image(image) => image.height(),
            Block::Paragraph(block) => block.height(line_width),
            Block::List(block) | Block::Item(block) => block.height(line_width),
            Block::CodeFence(block) => block.height(line_width),
            Block::Quote(block) => block.height(line_width),
            Block::Table(block) => block.height(line_width),
            Block::Math(block) => block.height(line_width),
        }
    }

    /// Rendered slide bodies for this block under `head`.
    ///
    /// A heading renders its own title slide and ignores `head`.
    pub fn slide_bodies(&self, head: &Head, layout: &Layout) -> Vec<String> {
        match self {
            Block::Heading(heading) => vec![heading.title_slide()],
            Block::Image(image) => vec![image.slide_content(head)],
            Block::Paragraph(block) => block.slides(head, layout),
            Block::List(block) | Block::Item(block) => block.slides(head, layout),
            Block::CodeFence(block) => block.slides(head, layout),
            Block::Quote(block) => block.slides(head, layout),
            Block::Table(block) => block.slides(head, layout),
            Block::Math(block) => block.slides(head, layout),
        }
    }

    /// Slide bodies joined into deck markup, each followed by the separator.
    pub fn md_slides(&self, head: &Head, layout: &Layout) -> String {
        self.slide_bodies(head, layout)
            .iter()
            .map(|body| format!("{}{SLIDE_SEPARATOR}", body.trim_end()))
            .collect()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Heading(head) => write!(
                f,
                "{} {}",
                "#".repeat(usize::from(head.level())),
                head.text()
            ),
            Block::Paragraph(block) => write!(f, "{block}"),
            Block::List(block) | Block::Item(block) => write!(f, "{block}"),
            Block::CodeFence(block) => write!(f, "{block}"),
            Block::Quote(block) => write!(f, "{block}"),
            Block::Table(block) => write!(f, "{block}"),
            Block::Image(block) => write!(f, "{block}"),
            Block::Math(block) => write!(f, "{block}"),
        }
    }
}

/// A paragraph fenced by `$$` on both ends.
pub fn is_math_block(spans: &[SpanNode]) -> bool {
    let starts = spans
        .first()
        .and_then(SpanNode::as_text)
        .is_some_and(|text| text.starts_with(MATH_FENCE));
    let ends = spans
        .last()
        .and_then(SpanNode::as_text)
        .is_some_and(|text| text.ends_with(MATH_FENCE));
    starts && ends
}

/// Math first, then a lone image, then plain prose.
fn paragraph_block(paragraph: &ParagraphNode) -> Block {
    match paragraph.spans.as_slice() {
        spans if is_math_block(spans) => Block::Math(MathBlock::new(&paragraph.source)),
        [SpanNode::Image { src, title, alt }] => Block::Image(ImageBlock::new(alt, src, title)),
        spans => Block::Paragraph(ParagraphBlock::new(spans)),
    }
}

/// Classify a parsed node into its block variant.
pub fn as_block(node: &BlockNode) -> Result<Block, ConvertError> {
    log::trace!("dispatching {}", node.kind_name());
    let block = match node {
        BlockNode::Heading { level, spans } => Block::Heading(Head::new(*level, spans)),
        BlockNode::Paragraph(paragraph) => paragraph_block(paragraph),
        BlockNode::List { items, .. } => Block::List(ListBlock::new(items)?),
        BlockNode::Item(item) => Block::Item(ListBlock::from_item(item)?),
        BlockNode::CodeFence { language, code } => {
            Block::CodeFence(CodeBlock::new(language, code))
        }
        BlockNode::Quote(children) => Block::Quote(QuoteBlock::new(children)?),
        BlockNode::Table {
            alignments,
            header,
            rows,
        } => Block::Table(TableBlock::new(alignments, header, rows)),
        BlockNode::ThematicBreak { .. }
        | BlockNode::Html { .. }
        | BlockNode::FootnoteDefinition { .. } => return Err(ConvertError::unsupported(node)),
    };
    Ok(block)
}
