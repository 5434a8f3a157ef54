use std::fmt;

use super::Component;

/// One line of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine(String);

impl CodeLine {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Component for CodeLine {
    fn size(&self) -> usize {
        self.0.chars().count()
    }
}

/// One line of a display math block, as TeX without its trailing `\\`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathLine(String);

impl MathLine {
    pub const LINE_BREAK: &'static str = "\\\\";

    pub fn new(tex: impl Into<String>) -> Self {
        Self(tex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MathLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Component for MathLine {
    /// Rendered rows: one, plus one per line break kept inside the line (the
    /// rows of a protected matrix).
    fn height(&self, _line_width: usize) -> usize {
        self.0.matches(Self::LINE_BREAK).count() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_line_height_follows_width() {
        assert_eq!(CodeLine::new("x".repeat(120)).height(50), 3);
        assert_eq!(CodeLine::new("").height(50), 0);
    }

    #[test]
    fn test_math_line_height_counts_inner_rows() {
        assert_eq!(MathLine::new("a + b").height(50), 1);
        assert_eq!(
            MathLine::new("A = \\begin{bmatrix} 1 \\\\ 2 \\\\ 3 \\end{bmatrix}").height(50),
            3
        );
    }
}
