use std::fmt;

use super::{Component, height_of};

/// One rendered line (or multi-line child block) of a flattened list.
///
/// The padding is `indent_size * level - len(leader)` spaces, so the content
/// column lines up across siblings whatever the width of their leaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentedListItem {
    content: String,
    level: usize,
    indent_size: usize,
    leader: String,
    /// Whether the content is a paragraph (as opposed to code, a quote, ...).
    paragraph: bool,
}

impl IndentedListItem {
    pub fn new(
        content: impl Into<String>,
        level: usize,
        indent_size: usize,
        leader: impl Into<String>,
        paragraph: bool,
    ) -> Self {
        Self {
            content: content.into(),
            level,
            indent_size,
            leader: leader.into(),
            paragraph,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn leader(&self) -> &str {
        &self.leader
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Column at which the content starts.
    pub fn content_column(&self) -> usize {
        self.indent_size * self.level
    }

    /// The whitespace written before the leader.
    pub fn padding(&self) -> String {
        " ".repeat(
            self.content_column()
                .saturating_sub(self.leader.chars().count()),
        )
    }

    /// Padding followed by the leader.
    pub fn prefix(&self) -> String {
        format!("{}{}", self.padding(), self.leader)
    }

    /// A follow-on paragraph of an item: it gets a blank line before it when
    /// it continues at the level of the previous line.
    pub fn is_loose(&self) -> bool {
        self.paragraph && self.leader.is_empty()
    }
}

impl fmt::Display for IndentedListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.content.lines();
        write!(f, "{}{}", self.prefix(), lines.next().unwrap_or_default())?;
        let continuation = " ".repeat(self.content_column());
        for line in lines {
            if line.is_empty() {
                f.write_str("\n")?;
            } else {
                write!(f, "\n{continuation}{line}")?;
            }
        }
        Ok(())
    }
}

impl Component for IndentedListItem {
    fn height(&self, line_width: usize) -> usize {
        self.to_string()
            .lines()
            .map(|line| height_of(line.chars().count(), line_width))
            .sum()
    }
}
