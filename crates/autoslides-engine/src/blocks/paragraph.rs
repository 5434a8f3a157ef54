use std::fmt;

use super::{CompositeBlock, Head};
use crate::components::{Sentence, decompose::sentences};
use crate::parsing::SpanNode;

/// A paragraph shown as one bullet per sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphBlock {
    sentences: Vec<Sentence>,
}

impl ParagraphBlock {
    pub fn new(spans: &[SpanNode]) -> Self {
        Self {
            sentences: sentences(spans),
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }
}

impl CompositeBlock for ParagraphBlock {
    type Part = Sentence;

    fn components(&self) -> &[Sentence] {
        &self.sentences
    }

    fn slide_content(&self, components: &[Sentence], head: &Head) -> String {
        let mut md = head.heading_line();
        for sentence in components {
            md.push_str(&format!("- {sentence}\n"));
        }
        md
    }
}

impl fmt::Display for ParagraphBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sentence) in self.sentences.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{sentence}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use pretty_assertions::assert_eq;

    fn head() -> Head {
        Head::new(1, &[SpanNode::Text("Notes".to_string())])
    }

    #[test]
    fn test_renders_a_bullet_per_sentence() {
        let block = ParagraphBlock::new(&[SpanNode::Text("One. Two. Three".to_string())]);

        let slides = block.slides(&head(), &Layout::default());

        assert_eq!(slides, vec!["# Notes\n\n- One.\n- Two.\n- Three\n"]);
        assert_eq!(block.to_string(), "One. Two. Three");
    }

    #[test]
    fn test_long_paragraph_spreads_over_slides() {
        let sentence = "word ".repeat(19); // 96 chars with the period: height 2
        let text = format!("{sentence}. ").repeat(4);
        let block = ParagraphBlock::new(&[SpanNode::Text(text)]);

        assert_eq!(block.sentences().len(), 4);
        assert_eq!(block.height(50), 8);
        let slides = block.split(&Layout::default());
        assert_eq!(slides.iter().map(|s| s.len()).collect::<Vec<_>>(), vec![3, 1]);
    }
}
