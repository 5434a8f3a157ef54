use std::fmt;

use super::{Component, Sentence, collapse};
use crate::parsing::{ColumnAlign, SpanNode};

/// A table cell: its collapsed text and the alignment of its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    sentence: Sentence,
    align: ColumnAlign,
}

impl Cell {
    pub fn new(spans: &[SpanNode], align: ColumnAlign) -> Self {
        Self {
            sentence: collapse(spans),
            align,
        }
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn align(&self) -> ColumnAlign {
        self.align
    }

    pub fn height(&self, line_width: usize) -> usize {
        self.sentence.height(line_width)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sentence)
    }
}

/// A table row, rendered as `| a | b |`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Build a row from per-cell spans; cells beyond the alignment list are unaligned.
    pub fn new(cells: &[Vec<SpanNode>], alignments: &[ColumnAlign]) -> Self {
        let cells = cells
            .iter()
            .enumerate()
            .map(|(i, spans)| Cell::new(spans, alignments.get(i).copied().unwrap_or_default()))
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cells.is_empty() {
            return Ok(());
        }
        f.write_str("|")?;
        for cell in &self.cells {
            write!(f, " {cell} |")?;
        }
        Ok(())
    }
}

impl Component for Row {
    /// The height of the tallest cell.
    fn height(&self, line_width: usize) -> usize {
        self.cells
            .iter()
            .map(|cell| cell.height(line_width))
            .max()
            .unwrap_or(0)
    }
}
