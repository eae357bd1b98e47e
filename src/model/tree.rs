//! Document tree for one page.

use super::Node;
use serde::{Deserialize, Serialize};

/// The document tree of a page.
///
/// Children keep the order of the source blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "root")]
pub struct DocumentTree {
    /// Top-level nodes
    pub children: Vec<Node>,
}

impl DocumentTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree from nodes.
    pub fn from_children(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Append a node.
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get plain text content of the whole tree.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(Node::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tree_new() {
        let tree = DocumentTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_tree_serializes_root_marker() {
        let tree = DocumentTree::from_children(vec![Node::paragraph("hi")]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["type"], json!("root"));
        assert_eq!(json["children"][0]["type"], json!("paragraph"));

        let back: DocumentTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_plain_text() {
        let mut tree = DocumentTree::new();
        tree.push(Node::heading(1, "Title"));
        tree.push(Node::Paragraph { children: vec![] });
        tree.push(Node::paragraph("Body"));
        assert_eq!(tree.plain_text(), "Title\n\nBody");
    }
}
