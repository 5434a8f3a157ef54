use crate::components::{Sentence, collapse};
use crate::parsing::SpanNode;

/// A heading: the title context of every slide that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Head {
    level: u8,
    text: Sentence,
}

impl Head {
    pub fn new(level: u8, spans: &[SpanNode]) -> Self {
        Self {
            level,
            text: collapse(spans),
        }
    }

    /// Context for content that appears before the first heading.
    pub fn untitled() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn text(&self) -> &Sentence {
        &self.text
    }

    pub fn head_text(&self) -> &str {
        self.text.text()
    }

    /// Headings never take up room in a slide's budget.
    pub fn height(&self) -> usize {
        0
    }

    /// The `# title` line and blank line that open every content slide, or
    /// nothing for the untitled context.
    pub fn heading_line(&self) -> String {
        if self.head_text().is_empty() {
            String::new()
        } else {
            format!("# {}\n\n", self.head_text())
        }
    }

    /// A centered slide announcing this heading.
    pub fn title_slide(&self) -> String {
        format!("class: center, middle\n# {}\n", self.head_text())
    }
}
