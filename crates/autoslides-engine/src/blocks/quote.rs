use std::fmt;

use super::{CompositeBlock, Head, as_block};
use crate::components::Sentence;
use crate::error::ConvertError;
use crate::parsing::BlockNode;

/// A block quote; each child block becomes one quoted component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteBlock {
    children: Vec<Sentence>,
}

impl QuoteBlock {
    pub fn new(children: &[BlockNode]) -> Result<Self, ConvertError> {
        let children = children
            .iter()
            .map(|child| as_block(child).map(|block| Sentence::plain(block.to_string())))
            .collect::<Result<_, _>>()?;
        Ok(Self { children })
    }
}

fn quoted(components: &[Sentence]) -> String {
    let mut md = String::new();
    for component in components {
        for line in component.text().lines() {
            if line.is_empty() {
                md.push_str(">\n");
            } else {
                md.push_str(&format!("> {line}\n"));
            }
        }
    }
    md
}

impl CompositeBlock for QuoteBlock {
    type Part = Sentence;

    fn components(&self) -> &[Sentence] {
        &self.children
    }

    fn slide_content(&self, components: &[Sentence], head: &Head) -> String {
        head.heading_line() + &quoted(components)
    }
}

impl fmt::Display for QuoteBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(quoted(&self.children).trim_end_matches('\n'))
    }
}
