//! Plain text rendering for document trees.

use crate::error::Result;
use crate::model::DocumentTree;

use super::walker::{render_tree, ElementMap};

/// Convert a document tree to plain text.
///
/// Blocks are separated by blank lines; styling and link targets are dropped.
pub fn to_text(tree: &DocumentTree) -> Result<String> {
    let result = render_tree(tree, &mut TextElements)?;
    let blocks: Vec<String> = result
        .into_outputs()
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect();
    Ok(blocks.join("\n\n").trim().to_string())
}

/// Element map producing unstyled text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextElements;

impl ElementMap for TextElements {
    type Output = String;

    fn paragraph(&mut self, _key: &str, children: Vec<String>) -> Option<String> {
        Some(children.concat())
    }

    fn heading(&mut self, _key: &str, _depth: u8, children: Vec<String>) -> Option<String> {
        Some(children.concat())
    }

    fn code(
        &mut self,
        _key: &str,
        _lang: Option<&str>,
        value: &str,
        _caption: Option<&str>,
    ) -> Option<String> {
        Some(value.to_string())
    }

    fn image(&mut self, _key: &str, _url: &str, alt: Option<&str>) -> Option<String> {
        Some(alt.unwrap_or_default().to_string())
    }

    fn blockquote(&mut self, _key: &str, children: Vec<String>) -> Option<String> {
        Some(children.join("\n"))
    }

    fn list_item(&mut self, _key: &str, _ordered: bool, children: Vec<String>) -> Option<String> {
        Some(children.join("\n"))
    }

    fn text(&mut self, _key: &str, value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn emphasis(&mut self, _key: &str, children: Vec<String>) -> Option<String> {
        Some(children.concat())
    }

    fn strong(&mut self, _key: &str, children: Vec<String>) -> Option<String> {
        Some(children.concat())
    }

    fn inline_code(&mut self, _key: &str, value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn link(&mut self, _key: &str, _url: &str, children: Vec<String>) -> Option<String> {
        Some(children.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Phrasing};

    #[test]
    fn test_to_text() {
        let tree = DocumentTree::from_children(vec![
            Node::heading(1, "Title"),
            Node::Paragraph {
                children: vec![
                    Phrasing::text("Hello, "),
                    Phrasing::link("https://example.com", "world"),
                ],
            },
            Node::image("x.png"),
            Node::ListItem {
                ordered: true,
                children: vec![Node::paragraph("item")],
            },
        ]);

        assert_eq!(to_text(&tree).unwrap(), "Title\n\nHello, world\n\nitem");
    }

    #[test]
    fn test_matches_tree_plain_text() {
        let tree = DocumentTree::from_children(vec![
            Node::paragraph("one"),
            Node::Blockquote {
                children: vec![Node::paragraph("two")],
            },
        ]);
        assert_eq!(to_text(&tree).unwrap(), tree.plain_text());
    }
}
