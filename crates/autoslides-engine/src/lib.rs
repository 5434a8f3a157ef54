//! Markdown to paginated slide deck conversion.
//!
//! The pipeline is preprocess → [`parse_document`] → [`as_block`] per node →
//! pagination → [`Deck`]. [`convert`] runs all of it.

pub mod blocks;
pub mod components;
pub mod deck;
pub mod error;
pub mod layout;
pub mod parsing;
pub mod preprocess;
pub mod tex;

pub use blocks::{Block, CompositeBlock, Head, as_block};
pub use components::{Component, Sentence};
pub use deck::{Deck, DeckOptions, convert, render_deck};
pub use error::ConvertError;
pub use layout::Layout;
pub use parsing::{BlockNode, SpanNode, parse_document};
