//! # Components
//!
//! Components are the atomic layout units a composite block is paginated by:
//! sentences, code lines, math lines, table rows and indented list items.
//!
//! ## Modules
//!
//! - **`sentence`**: `Sentence` with its strong/emphasized decorations and `collapse`
//! - **`decompose`**: paragraph → sentence splitting that never cuts inline math
//! - **`lines`**: `CodeLine` and `MathLine`
//! - **`table`**: `Cell` and `Row`
//! - **`list_item`**: `IndentedListItem`
//!
//! ## Key Invariants
//!
//! - `height` is a pure function of the rendered size; no component is mutated
//!   after construction
//! - Height is coarse: `ceil(size / line_width)`

pub mod decompose;
pub mod lines;
pub mod list_item;
pub mod sentence;
pub mod table;

use std::fmt;

pub use decompose::{Delimited, decompose, delimited_text};
pub use lines::{CodeLine, MathLine};
pub use list_item::IndentedListItem;
pub use sentence::{Sentence, collapse};
pub use table::{Cell, Row};

/// An atomic layout unit of a composite block.
pub trait Component: fmt::Display {
    /// Rendered size in characters.
    fn size(&self) -> usize {
        self.to_string().chars().count()
    }

    /// Estimated number of rendered lines at `line_width` characters per line.
    fn height(&self, line_width: usize) -> usize {
        height_of(self.size(), line_width)
    }
}

/// `ceil(size / line_width)`, with a zero width treated as one.
pub fn height_of(size: usize, line_width: usize) -> usize {
    size.div_ceil(line_width.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 50, 0)]
    #[case(1, 50, 1)]
    #[case(50, 50, 1)]
    #[case(51, 50, 2)]
    #[case(7, 0, 7)]
    fn test_height_is_ceiling_of_size_over_width(
        #[case] size: usize,
        #[case] width: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(height_of(size, width), expected);
    }
}
