use std::fmt;

use super::Head;
use crate::components::{Sentence, collapse};
use crate::parsing::SpanNode;

/// A paragraph holding a single image; always one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    alt: Sentence,
    src: String,
    title: String,
}

impl ImageBlock {
    pub fn new(alt: &[SpanNode], src: &str, title: &str) -> Self {
        Self {
            alt: collapse(alt),
            src: src.to_string(),
            title: title.to_string(),
        }
    }

    pub fn height(&self) -> usize {
        1
    }

    pub fn slide_content(&self, head: &Head) -> String {
        format!("{}{self}", head.heading_line())
    }
}

impl fmt::Display for ImageBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "![{}]({})", self.alt, self.src)
        } else {
            write!(f, "![{}]({} \"{}\")", self.alt, self.src, self.title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_image_under_heading() {
        let block = ImageBlock::new(&[SpanNode::Text("diagram".to_string())], "img/d.png", "");
        let head = Head::new(1, &[SpanNode::Text("Overview".to_string())]);

        assert_eq!(block.slide_content(&head), "# Overview\n\n![diagram](img/d.png)");
        assert_eq!(block.height(), 1);
    }
}
