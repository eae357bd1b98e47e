//! Element maps for rendering document trees into arbitrary output.
//!
//! An [`ElementMap`] supplies one function per node kind. [`render_tree`]
//! walks the tree top-down, renders children before handing them to their
//! parent's function, and gives every node a stable per-kind key. Methods
//! return `None` by default, which marks the kind as unmapped; meeting an
//! unmapped kind fails the whole render pass.
//!
//! # Example
//!
//! ```
//! use pagesource::model::{DocumentTree, Node};
//! use pagesource::render::walker::{render_tree, ElementMap};
//!
//! struct Keys;
//!
//! impl ElementMap for Keys {
//!     type Output = String;
//!
//!     fn paragraph(&mut self, key: &str, _children: Vec<String>) -> Option<String> {
//!         Some(key.to_string())
//!     }
//!
//!     fn text(&mut self, key: &str, _value: &str) -> Option<String> {
//!         Some(key.to_string())
//!     }
//! }
//!
//! let tree = DocumentTree::from_children(vec![Node::paragraph("a"), Node::paragraph("b")]);
//! let result = render_tree(&tree, &mut Keys)?;
//! assert_eq!(result.into_outputs(), vec!["paragraph-0", "paragraph-1"]);
//! # Ok::<(), pagesource::report::PipelineError>(())
//! ```

use super::{NodeCounts, RenderResult, Rendered};
use crate::model::{DocumentTree, Node, NodeKind, Phrasing};
use crate::report::{EventKey, ExplanationKey, Params, PipelineError, RemediationKey};
use crate::Outcome;

/// Rendering functions, one per node kind.
///
/// Every method receives the node's key and its already rendered children.
pub trait ElementMap {
    /// Rendered output of a single node.
    type Output;

    /// Render a paragraph.
    fn paragraph(&mut self, key: &str, children: Vec<Self::Output>) -> Option<Self::Output> {
        let _ = (key, children);
        None
    }

    /// Render a heading.
    fn heading(
        &mut self,
        key: &str,
        depth: u8,
        children: Vec<Self::Output>,
    ) -> Option<Self::Output> {
        let _ = (key, depth, children);
        None
    }

    /// Render a code listing.
    fn code(
        &mut self,
        key: &str,
        lang: Option<&str>,
        value: &str,
        caption: Option<&str>,
    ) -> Option<Self::Output> {
        let _ = (key, lang, value, caption);
        None
    }

    /// Render an image.
    fn image(&mut self, key: &str, url: &str, alt: Option<&str>) -> Option<Self::Output> {
        let _ = (key, url, alt);
        None
    }

    /// Render a block quote.
    fn blockquote(&mut self, key: &str, children: Vec<Self::Output>) -> Option<Self::Output> {
        let _ = (key, children);
        None
    }

    /// Render a list item.
    fn list_item(
        &mut self,
        key: &str,
        ordered: bool,
        children: Vec<Self::Output>,
    ) -> Option<Self::Output> {
        let _ = (key, ordered, children);
        None
    }

    /// Render a text run.
    fn text(&mut self, key: &str, value: &str) -> Option<Self::Output> {
        let _ = (key, value);
        None
    }

    /// Render emphasized content.
    fn emphasis(&mut self, key: &str, children: Vec<Self::Output>) -> Option<Self::Output> {
        let _ = (key, children);
        None
    }

    /// Render strong content.
    fn strong(&mut self, key: &str, children: Vec<Self::Output>) -> Option<Self::Output> {
        let _ = (key, children);
        None
    }

    /// Render inline code.
    fn inline_code(&mut self, key: &str, value: &str) -> Option<Self::Output> {
        let _ = (key, value);
        None
    }

    /// Render a link.
    fn link(&mut self, key: &str, url: &str, children: Vec<Self::Output>) -> Option<Self::Output> {
        let _ = (key, url, children);
        None
    }
}

/// Render a tree with an element map.
///
/// Empty paragraphs and headings are skipped and take no key.
pub fn render_tree<M: ElementMap>(
    tree: &DocumentTree,
    map: &mut M,
) -> Outcome<RenderResult<M::Output>> {
    let mut elements = Vec::with_capacity(tree.len());
    let mut counts = NodeCounts::new();

    for node in tree.children.iter().filter(|node| !node.is_empty()) {
        let (rendered, next) = render_node(node, counts, map)?;
        elements.push(rendered);
        counts = next;
    }

    Ok(RenderResult { elements, counts })
}

fn render_node<M: ElementMap>(
    node: &Node,
    counts: NodeCounts,
    map: &mut M,
) -> Outcome<(Rendered<M::Output>, NodeCounts)> {
    let kind = node.kind();
    let (key, counts) = counts.next_key(kind);

    let (output, counts) = match node {
        Node::Paragraph { children } => {
            let (children, counts) = render_phrasing(children, counts, map)?;
            (map.paragraph(&key, children), counts)
        }
        Node::Heading { depth, children } => {
            let (children, counts) = render_phrasing(children, counts, map)?;
            (map.heading(&key, *depth, children), counts)
        }
        Node::Code {
            lang,
            value,
            caption,
        } => (
            map.code(&key, lang.as_deref(), value, caption.as_deref()),
            counts,
        ),
        Node::Image { url, alt } => (map.image(&key, url, alt.as_deref()), counts),
        Node::Blockquote { children } => {
            let (children, counts) = render_blocks(children, counts, map)?;
            (map.blockquote(&key, children), counts)
        }
        Node::ListItem { ordered, children } => {
            let (children, counts) = render_blocks(children, counts, map)?;
            (map.list_item(&key, *ordered, children), counts)
        }
    };

    let output = output.ok_or_else(|| unmapped(kind))?;
    Ok((Rendered { key, kind, output }, counts))
}

fn render_blocks<M: ElementMap>(
    nodes: &[Node],
    mut counts: NodeCounts,
    map: &mut M,
) -> Outcome<(Vec<M::Output>, NodeCounts)> {
    let mut outputs = Vec::with_capacity(nodes.len());
    for node in nodes.iter().filter(|node| !node.is_empty()) {
        let (rendered, next) = render_node(node, counts, map)?;
        outputs.push(rendered.output);
        counts = next;
    }
    Ok((outputs, counts))
}

fn render_phrasing<M: ElementMap>(
    nodes: &[Phrasing],
    mut counts: NodeCounts,
    map: &mut M,
) -> Outcome<(Vec<M::Output>, NodeCounts)> {
    let mut outputs = Vec::with_capacity(nodes.len());
    for node in nodes {
        let kind = node.kind();
        let (key, next) = counts.next_key(kind);

        let (output, next) = match node {
            Phrasing::Text { value } => (map.text(&key, value), next),
            Phrasing::InlineCode { value } => (map.inline_code(&key, value), next),
            Phrasing::Emphasis { children } => {
                let (children, next) = render_phrasing(children, next, map)?;
                (map.emphasis(&key, children), next)
            }
            Phrasing::Strong { children } => {
                let (children, next) = render_phrasing(children, next, map)?;
                (map.strong(&key, children), next)
            }
            Phrasing::Link { url, children } => {
                let (children, next) = render_phrasing(children, next, map)?;
                (map.link(&key, url, children), next)
            }
        };

        outputs.push(output.ok_or_else(|| unmapped(kind))?);
        counts = next;
    }
    Ok((outputs, counts))
}

fn unmapped(kind: NodeKind) -> PipelineError {
    PipelineError::compose(
        &[
            EventKey::RenderingFailed.into(),
            ExplanationKey::UnsupportedNode.into(),
            RemediationKey::MapNodeKind.into(),
        ],
        &Params::new().with("node_kind", kind.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders every node as `key[children]`.
    struct KeyTree;

    impl KeyTree {
        fn wrap(key: &str, children: Vec<String>) -> Option<String> {
            Some(format!("{}[{}]", key, children.join(",")))
        }
    }

    impl ElementMap for KeyTree {
        type Output = String;

        fn paragraph(&mut self, key: &str, children: Vec<String>) -> Option<String> {
            Self::wrap(key, children)
        }

        fn heading(&mut self, key: &str, _depth: u8, children: Vec<String>) -> Option<String> {
            Self::wrap(key, children)
        }

        fn blockquote(&mut self, key: &str, children: Vec<String>) -> Option<String> {
            Self::wrap(key, children)
        }

        fn list_item(&mut self, key: &str, _ordered: bool, children: Vec<String>) -> Option<String> {
            Self::wrap(key, children)
        }

        fn text(&mut self, key: &str, _value: &str) -> Option<String> {
            Some(key.to_string())
        }

        fn strong(&mut self, key: &str, children: Vec<String>) -> Option<String> {
            Self::wrap(key, children)
        }
    }

    #[test]
    fn test_keys_follow_document_order() {
        let tree = DocumentTree::from_children(vec![
            Node::heading(1, "T"),
            Node::Paragraph {
                children: vec![Phrasing::text("a"), Phrasing::strong("b")],
            },
            Node::ListItem {
                ordered: false,
                children: vec![Node::paragraph("c")],
            },
            Node::Blockquote {
                children: vec![Node::paragraph("d")],
            },
        ]);

        let result = render_tree(&tree, &mut KeyTree).unwrap();
        assert_eq!(
            result.into_outputs(),
            vec![
                "heading-0[text-0]",
                "paragraph-0[text-1,strong-0[text-2]]",
                "listItem-0[paragraph-1[text-3]]",
                "blockquote-0[paragraph-2[text-4]]",
            ]
        );
    }

    #[test]
    fn test_counts() {
        let tree = DocumentTree::from_children(vec![Node::paragraph("a"), Node::paragraph("b")]);
        let result = render_tree(&tree, &mut KeyTree).unwrap();
        assert_eq!(result.counts.get(NodeKind::Paragraph), 2);
        assert_eq!(result.counts.get(NodeKind::Text), 2);
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["paragraph-0", "paragraph-1"]);
    }

    #[test]
    fn test_empty_nodes_skipped() {
        let tree = DocumentTree::from_children(vec![
            Node::Paragraph { children: vec![] },
            Node::Heading {
                depth: 2,
                children: vec![],
            },
            Node::paragraph("x"),
        ]);
        let result = render_tree(&tree, &mut KeyTree).unwrap();
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["paragraph-0"]);
    }

    #[test]
    fn test_unmapped_kind_fails() {
        let tree = DocumentTree::from_children(vec![
            Node::paragraph("ok"),
            Node::Paragraph {
                children: vec![Phrasing::InlineCode {
                    value: "x".to_string(),
                }],
            },
        ]);

        let err = render_tree(&tree, &mut KeyTree).unwrap_err();
        assert!(err.has_event(EventKey::RenderingFailed));
        assert!(err.has_explanation(ExplanationKey::UnsupportedNode));
        assert!(err.has_remediation(RemediationKey::MapNodeKind));
        assert_eq!(err.param("node_kind"), Some("inlineCode"));
    }

    #[test]
    fn test_unmapped_block_kind_fails() {
        let tree = DocumentTree::from_children(vec![Node::image("x")]);
        let err = render_tree(&tree, &mut KeyTree).unwrap_err();
        assert_eq!(err.param("node_kind"), Some("image"));
    }
}
