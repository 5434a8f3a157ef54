use std::fmt;

use super::{CompositeBlock, Head};
use crate::components::MathLine;
use crate::tex::split_math_lines;

const MATH_FENCE: &str = "$$";
const BEGIN_ALIGNED: &str = "\\begin{aligned}";
const END_ALIGNED: &str = "\\end{aligned}";

/// A `$$ … $$` display math block, paginated by its `\\` line breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathBlock {
    aligned: bool,
    lines: Vec<MathLine>,
}

impl MathBlock {
    /// Build from the markdown source of the block, fences included.
    ///
    /// Missing or lopsided fences are tolerated: whatever fence is present is
    /// stripped and the rest is treated as TeX.
    pub fn new(source: &str) -> Self {
        let trimmed = source.trim();
        let tex = trimmed.strip_prefix(MATH_FENCE).unwrap_or(trimmed);
        let tex = tex.strip_suffix(MATH_FENCE).unwrap_or(tex).trim();

        let (aligned, body) = match tex
            .strip_prefix(BEGIN_ALIGNED)
            .and_then(|rest| rest.strip_suffix(END_ALIGNED))
        {
            Some(body) => (true, body),
            None => (false, tex),
        };

        Self {
            aligned,
            lines: split_math_lines(body)
                .into_iter()
                .map(MathLine::new)
                .collect(),
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.aligned
    }

    fn joined(lines: &[MathLine], separator: &str) -> String {
        lines
            .iter()
            .map(MathLine::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl CompositeBlock for MathBlock {
    type Part = MathLine;

    fn components(&self) -> &[MathLine] {
        &self.lines
    }

    fn slide_content(&self, components: &[MathLine], head: &Head) -> String {
        let mut md = head.heading_line();
        md.push_str("<div>\n$$\n");
        if self.aligned {
            md.push_str(&format!("{BEGIN_ALIGNED}\n"));
        }
        if !components.is_empty() {
            let separator = format!("{}\n", MathLine::LINE_BREAK);
            md.push_str(&Self::joined(components, &separator));
            md.push('\n');
        }
        if self.aligned {
            md.push_str(&format!("{END_ALIGNED}\n"));
        }
        md.push_str("$$\n</div>");
        md
    }
}

impl fmt::Display for MathBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = Self::joined(&self.lines, &format!(" {} ", MathLine::LINE_BREAK));
        if self.aligned {
            write!(f, "$$ {BEGIN_ALIGNED} {body} {END_ALIGNED} $$")
        } else {
            write!(f, "$$ {body} $$")
        }
    }
}
