/// Tunables for height estimation and pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Characters assumed to fit on one rendered line.
    pub line_width: usize,
    /// Height budget of one slide, in estimated lines.
    pub lines: usize,
}

impl Layout {
    pub const DEFAULT_LINE_WIDTH: usize = 50;
    pub const DEFAULT_LINES: usize = 6;

    pub fn new(line_width: usize, lines: usize) -> Self {
        Self { line_width, lines }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINE_WIDTH, Self::DEFAULT_LINES)
    }
}
