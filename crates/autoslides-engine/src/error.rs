use crate::parsing::BlockNode;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A block construct no slide variant renders. Aborts the conversion.
    #[error("Unsupported {}{}", .node.kind_name(), at_offset(.node))]
    UnsupportedNode { node: Box<BlockNode> },
}

impl ConvertError {
    pub fn unsupported(node: &BlockNode) -> Self {
        ConvertError::UnsupportedNode {
            node: Box::new(node.clone()),
        }
    }

    /// Source byte offset of the offending node, when it is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ConvertError::UnsupportedNode { node } => node.offset(),
        }
    }
}

fn at_offset(node: &BlockNode) -> String {
    node.offset()
        .map(|offset| format!(" at byte {offset}"))
        .unwrap_or_default()
}
