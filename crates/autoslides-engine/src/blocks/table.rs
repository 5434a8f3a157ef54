use std::fmt;

use super::{CompositeBlock, Head};
use crate::components::{Component, Row};
use crate::parsing::{ColumnAlign, SpanNode};

/// A table paginated by body rows; the header repeats on every slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    header: Row,
    rows: Vec<Row>,
    alignments: Vec<ColumnAlign>,
}

impl TableBlock {
    pub fn new(
        alignments: &[ColumnAlign],
        header: &[Vec<SpanNode>],
        rows: &[Vec<Vec<SpanNode>>],
    ) -> Self {
        Self {
            header: Row::new(header, alignments),
            rows: rows.iter().map(|row| Row::new(row, alignments)).collect(),
            alignments: alignments.to_vec(),
        }
    }

    pub fn header(&self) -> &Row {
        &self.header
    }

    /// The delimiter row, e.g. `|:---:|----:|`.
    pub fn alignment_row(&self) -> String {
        if self.header.cells().is_empty() {
            return String::new();
        }
        let mut md = String::from("|");
        for align in &self.alignments {
            md.push_str(align.delimiter_cell());
        }
        md
    }

    fn render(&self, rows: &[Row]) -> String {
        let mut md = format!("{}\n{}\n", self.header, self.alignment_row());
        for row in rows {
            md.push_str(&format!("{row}\n"));
        }
        md
    }
}

impl CompositeBlock for TableBlock {
    type Part = Row;

    fn components(&self) -> &[Row] {
        &self.rows
    }

    fn slide_content(&self, components: &[Row], head: &Head) -> String {
        head.heading_line() + &self.render(components)
    }

    /// Body rows plus the header.
    fn height(&self, line_width: usize) -> usize {
        self.header.height(line_width)
            + self
                .rows
                .iter()
                .map(|row| row.height(line_width))
                .sum::<usize>()
    }
}

impl fmt::Display for TableBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render(&self.rows).trim_end_matches('\n'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::parsing::{BlockNode, parse_document};
    use pretty_assertions::assert_eq;

    fn table_from(md: &str) -> TableBlock {
        match &parse_document(md)[0] {
            BlockNode::Table {
                alignments,
                header,
                rows,
            } => TableBlock::new(alignments, header, rows),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_header_and_alignment_repeat_on_every_slide() {
        let body = (1..=8).map(|i| format!("| r{i} | {i} |\n")).collect::<String>();
        let block = table_from(&format!("| name | n |\n|:-:|--:|\n{body}"));
        let head = Head::new(2, &[SpanNode::Text("Data".to_string())]);

        let slides = block.slides(&head, &Layout::default());

        assert_eq!(slides.len(), 2);
        assert_eq!(
            slides[1],
            "# Data\n\n| name | n |\n|:---:|----:|\n| r7 | 7 |\n| r8 | 8 |\n"
        );
        assert_eq!(block.height(50), 9);
    }

    #[test]
    fn test_display_renders_whole_table() {
        let block = table_from("| a | b |\n|---|:--|\n| 1 | 2 |");

        assert_eq!(block.to_string(), "| a | b |\n|-----|:----|\n| 1 | 2 |");
    }
}
