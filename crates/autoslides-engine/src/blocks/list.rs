use std::fmt;

use super::{Block, CompositeBlock, Head, as_block};
use crate::components::IndentedListItem;
use crate::error::ConvertError;
use crate::parsing::{BlockNode, ItemNode};

/// A node of a list tree, addressed by its index in a [`ListArena`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum ListEntry {
    List {
        items: Vec<usize>,
    },
    Item {
        leader: String,
        children: Vec<usize>,
    },
    /// A non-list child of an item, already rendered.
    Leaf {
        content: String,
        paragraph: bool,
    },
}

/// Flat storage for a list tree: lists, items and their rendered leaf blocks.
#[derive(Debug, Clone, Default)]
pub struct ListArena {
    entries: Vec<ListEntry>,
}

/// Traversal state of one pending entry in [`ListArena::itemized`].
struct Visit {
    index: usize,
    level: usize,
    indent_size: usize,
    leader: String,
}

impl ListArena {
    /// Store a list and everything under it; returns the list's index.
    pub fn add_list(&mut self, items: &[ItemNode]) -> Result<usize, ConvertError> {
        let items = items
            .iter()
            .map(|item| self.add_item(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.push(ListEntry::List { items }))
    }

    /// Store a single item and its children; returns the item's index.
    pub fn add_item(&mut self, item: &ItemNode) -> Result<usize, ConvertError> {
        let children = item
            .children
            .iter()
            .map(|child| self.add_child(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.push(ListEntry::Item {
            leader: item.leader.clone(),
            children,
        }))
    }

    fn add_child(&mut self, node: &BlockNode) -> Result<usize, ConvertError> {
        match node {
            BlockNode::List { items, .. } => self.add_list(items),
            BlockNode::Item(item) => self.add_item(item),
            other => {
                let block = as_block(other)?;
                Ok(self.push(ListEntry::Leaf {
                    content: block.to_string(),
                    paragraph: matches!(block, Block::Paragraph(_)),
                }))
            }
        }
    }

    fn push(&mut self, entry: ListEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Flatten the tree under `root` into indented lines, depth first.
    ///
    /// Each item's children sit one level deeper than the item, indented by
    /// the item's leader width plus one. Only the first child carries the
    /// item's leader; later children get an empty leader and line up under it.
    pub fn itemized(&self, root: usize) -> Vec<IndentedListItem> {
        let mut out = Vec::new();
        let mut stack = vec![Visit {
            index: root,
            level: 0,
            indent_size: 0,
            leader: String::new(),
        }];

        while let Some(visit) = stack.pop() {
            let Some(entry) = self.entries.get(visit.index) else {
                continue;
            };
            match entry {
                ListEntry::List { items } => {
                    for &item in items.iter().rev() {
                        stack.push(Visit {
                            index: item,
                            level: visit.level,
                            indent_size: visit.indent_size,
                            leader: visit.leader.clone(),
                        });
                    }
                }
                ListEntry::Item { leader, children } => {
                    let indent_size = leader.chars().count() + 1;
                    for (i, &child) in children.iter().enumerate().rev() {
                        stack.push(Visit {
                            index: child,
                            level: visit.level + 1,
                            indent_size,
                            leader: if i == 0 {
                                format!("{leader} ")
                            } else {
                                String::new()
                            },
                        });
                    }
                }
                ListEntry::Leaf { content, paragraph } => out.push(IndentedListItem::new(
                    content.clone(),
                    visit.level,
                    visit.indent_size,
                    visit.leader,
                    *paragraph,
                )),
            }
        }
        out
    }
}

/// A list (or a lone list item) shown as its flattened, indented lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlock {
    items: Vec<IndentedListItem>,
}

impl ListBlock {
    pub fn new(items: &[ItemNode]) -> Result<Self, ConvertError> {
        let mut arena = ListArena::default();
        let root = arena.add_list(items)?;
        Ok(Self {
            items: arena.itemized(root),
        })
    }

    pub fn from_item(item: &ItemNode) -> Result<Self, ConvertError> {
        let mut arena = ListArena::default();
        let root = arena.add_item(item)?;
        Ok(Self {
            items: arena.itemized(root),
        })
    }
}

/// One line per component, with a blank line before a follow-on paragraph
/// that continues at the previous line's level.
fn render_lines(components: &[IndentedListItem]) -> String {
    let mut md = String::new();
    for (i, component) in components.iter().enumerate() {
        if i > 0 && component.is_loose() && component.level() == components[i - 1].level() {
            md.push('\n');
        }
        md.push_str(&format!("{component}\n"));
    }
    md
}

impl CompositeBlock for ListBlock {
    type Part = IndentedListItem;

    fn components(&self) -> &[IndentedListItem] {
        &self.items
    }

    fn slide_content(&self, components: &[IndentedListItem], head: &Head) -> String {
        head.heading_line() + &render_lines(components)
    }
}

impl fmt::Display for ListBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(render_lines(&self.items).trim_end_matches('\n'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{ParagraphNode, SpanNode, parse_document};
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str) -> BlockNode {
        BlockNode::Paragraph(ParagraphNode {
            spans: vec![SpanNode::Text(text.to_string())],
            source: text.to_string(),
        })
    }

    fn list_from(md: &str) -> ListBlock {
        match &parse_document(md)[0] {
            BlockNode::List { items, .. } => ListBlock::new(items).unwrap(),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_first_child_takes_leader_and_later_children_align() {
        let item = ItemNode {
            leader: "1.".to_string(),
            children: vec![
                paragraph("Intro"),
                BlockNode::List {
                    ordered: false,
                    items: vec![ItemNode {
                        leader: "-".to_string(),
                        children: vec![paragraph("sub")],
                    }],
                },
                paragraph("Outro"),
            ],
        };

        let block = ListBlock::new(&[item]).unwrap();
        let items = block.components();

        assert_eq!(items.len(), 3);
        assert_eq!((items[0].level(), items[0].padding()), (1, String::new()));
        assert_eq!(items[0].prefix(), "1. ");
        assert_eq!((items[1].level(), items[1].prefix()), (2, "  - ".to_string()));
        assert_eq!((items[2].level(), items[2].padding()), (1, "   ".to_string()));
        assert_eq!(block.to_string(), "1. Intro\n  - sub\n   Outro");
    }

    #[test]
    fn test_nested_markdown_list_is_flattened_in_order() {
        let block = list_from("- a\n  - b\n    - c\n- d");

        assert_eq!(block.to_string(), "- a\n  - b\n    - c\n- d");
        assert_eq!(
            block
                .components()
                .iter()
                .map(IndentedListItem::level)
                .collect::<Vec<_>>(),
            vec![1, 2, 3, 1]
        );
    }

    #[test]
    fn test_follow_on_paragraph_gets_blank_line() {
        let block = list_from("- first\n\n  second paragraph\n- next");

        let slide = block.slide_content(block.components(), &Head::untitled());

        assert_eq!(slide, "- first\n\n  second paragraph\n- next\n");
    }

    #[test]
    fn test_code_inside_item_is_indented() {
        let block = list_from("- run:\n\n  ```sh\n  ls\n  ```");

        assert_eq!(block.to_string(), "- run:\n  ```sh\n  ls\n  ```");
    }

    #[test]
    fn test_unsupported_child_aborts() {
        let item = ItemNode {
            leader: "-".to_string(),
            children: vec![BlockNode::ThematicBreak { offset: 3 }],
        };

        assert!(matches!(
            ListBlock::new(&[item]),
            Err(ConvertError::UnsupportedNode { .. })
        ));
    }

    #[test]
    fn test_lone_item_renders_like_a_list() {
        let item = ItemNode {
            leader: "*".to_string(),
            children: vec![paragraph("solo")],
        };

        let block = ListBlock::from_item(&item).unwrap();

        assert_eq!(block.to_string(), "* solo");
    }
}
