use std::fmt;

use crate::blocks::{Block, Head, SLIDE_SEPARATOR, as_block};
use crate::error::ConvertError;
use crate::layout::Layout;
use crate::parsing::{BlockNode, parse_document};
use crate::preprocess::preprocess;

/// Everything that shapes a deck besides the source itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckOptions {
    pub layout: Layout,
    /// Headings at this level or above (numerically lower) get a title slide.
    pub title_level: u8,
}

impl DeckOptions {
    pub const DEFAULT_TITLE_LEVEL: u8 = 3;
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            title_level: Self::DEFAULT_TITLE_LEVEL,
        }
    }
}

/// Ordered slide bodies of a converted document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    slides: Vec<String>,
}

impl Deck {
    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    fn push(&mut self, body: String) {
        self.slides.push(body.trim_end().to_string());
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for body in &self.slides {
            write!(f, "{body}{SLIDE_SEPARATOR}")?;
        }
        Ok(())
    }
}

/// Render parsed nodes to slides, in document order.
///
/// Each heading becomes the context for the blocks after it. The first
/// unsupported node aborts the whole run.
pub fn render_deck(nodes: &[BlockNode], options: &DeckOptions) -> Result<Deck, ConvertError> {
    let mut deck = Deck::default();
    let mut head = Head::untitled();

    for node in nodes {
        match as_block(node)? {
            Block::Heading(heading) => {
                if heading.level() <= options.title_level {
                    deck.push(heading.title_slide());
                }
                head = heading;
            }
            block => {
                let bodies = block.slide_bodies(&head, &options.layout);
                log::debug!(
                    "{} under {:?}: height {}, {} slide(s)",
                    node.kind_name(),
                    head.head_text(),
                    block.height(options.layout.line_width),
                    bodies.len()
                );
                for body in bodies {
                    deck.push(body);
                }
            }
        }
    }
    Ok(deck)
}

/// Convert a markdown document into a slide deck.
pub fn convert(markdown: &str, options: &DeckOptions) -> Result<Deck, ConvertError> {
    let source = preprocess(markdown);
    let nodes = parse_document(&source);
    log::debug!("parsed {} top-level nodes", nodes.len());
    render_deck(&nodes, options)
}
