//! Document nodes: block-level content and phrasing runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block-level node of a document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// A paragraph of phrasing content
    Paragraph {
        /// Inline content
        children: Vec<Phrasing>,
    },

    /// A heading
    Heading {
        /// Heading level (1-6)
        depth: u8,
        /// Inline content
        children: Vec<Phrasing>,
    },

    /// A code listing
    Code {
        /// Language identifier
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        /// Source text
        value: String,
        /// Caption shown below the listing
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },

    /// An image
    Image {
        /// Image URL
        url: String,
        /// Alternative text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },

    /// A block quote
    Blockquote {
        /// Quoted blocks
        children: Vec<Node>,
    },

    /// An item of a bulleted or numbered list
    ListItem {
        /// Whether the item belongs to a numbered list
        ordered: bool,
        /// Item content
        children: Vec<Node>,
    },
}

impl Node {
    /// Create a paragraph with plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph {
            children: vec![Phrasing::text(text)],
        }
    }

    /// Create a heading with plain text.
    pub fn heading(depth: u8, text: impl Into<String>) -> Self {
        Node::Heading {
            depth: depth.clamp(1, 6),
            children: vec![Phrasing::text(text)],
        }
    }

    /// Create an image without alternative text.
    pub fn image(url: impl Into<String>) -> Self {
        Node::Image {
            url: url.into(),
            alt: None,
        }
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Heading { .. } => NodeKind::Heading,
            Node::Code { .. } => NodeKind::Code,
            Node::Image { .. } => NodeKind::Image,
            Node::Blockquote { .. } => NodeKind::Blockquote,
            Node::ListItem { .. } => NodeKind::ListItem,
        }
    }

    /// Check if the node has no visible content.
    ///
    /// Only paragraphs and headings can be empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Paragraph { children } | Node::Heading { children, .. } => children.is_empty(),
            _ => false,
        }
    }

    /// Get the plain text content of the node.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Paragraph { children } | Node::Heading { children, .. } => {
                phrasing_text(children)
            }
            Node::Code { value, .. } => value.clone(),
            Node::Image { alt, .. } => alt.clone().unwrap_or_default(),
            Node::Blockquote { children } | Node::ListItem { children, .. } => children
                .iter()
                .map(Node::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Inline content inside block nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Phrasing {
    /// Plain text
    Text {
        /// Text content
        value: String,
    },

    /// Emphasized (italic) content
    Emphasis {
        /// Inner content
        children: Vec<Phrasing>,
    },

    /// Strong (bold) content
    Strong {
        /// Inner content
        children: Vec<Phrasing>,
    },

    /// Inline code
    InlineCode {
        /// Code text
        value: String,
    },

    /// A hyperlink
    Link {
        /// Link target
        url: String,
        /// Link text (text, emphasis or strong)
        children: Vec<Phrasing>,
    },
}

impl Phrasing {
    /// Create a text run.
    pub fn text(value: impl Into<String>) -> Self {
        Phrasing::Text {
            value: value.into(),
        }
    }

    /// Create a bold run.
    pub fn strong(value: impl Into<String>) -> Self {
        Phrasing::Strong {
            children: vec![Phrasing::text(value)],
        }
    }

    /// Create an italic run.
    pub fn emphasis(value: impl Into<String>) -> Self {
        Phrasing::Emphasis {
            children: vec![Phrasing::text(value)],
        }
    }

    /// Create a link with plain text.
    pub fn link(url: impl Into<String>, text: impl Into<String>) -> Self {
        Phrasing::Link {
            url: url.into(),
            children: vec![Phrasing::text(text)],
        }
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Phrasing::Text { .. } => NodeKind::Text,
            Phrasing::Emphasis { .. } => NodeKind::Emphasis,
            Phrasing::Strong { .. } => NodeKind::Strong,
            Phrasing::InlineCode { .. } => NodeKind::InlineCode,
            Phrasing::Link { .. } => NodeKind::Link,
        }
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        match self {
            Phrasing::Text { value } | Phrasing::InlineCode { value } => value.clone(),
            Phrasing::Emphasis { children }
            | Phrasing::Strong { children }
            | Phrasing::Link { children, .. } => phrasing_text(children),
        }
    }
}

pub(crate) fn phrasing_text(children: &[Phrasing]) -> String {
    children.iter().map(Phrasing::plain_text).collect()
}

/// Every kind of document node, block-level and phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// [`Node::Paragraph`]
    Paragraph,
    /// [`Node::Heading`]
    Heading,
    /// [`Node::Code`]
    Code,
    /// [`Node::Image`]
    Image,
    /// [`Node::Blockquote`]
    Blockquote,
    /// [`Node::ListItem`]
    ListItem,
    /// [`Phrasing::Text`]
    Text,
    /// [`Phrasing::Emphasis`]
    Emphasis,
    /// [`Phrasing::Strong`]
    Strong,
    /// [`Phrasing::InlineCode`]
    InlineCode,
    /// [`Phrasing::Link`]
    Link,
}

impl NodeKind {
    /// Name used in serialized trees and render keys.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Code => "code",
            NodeKind::Image => "image",
            NodeKind::Blockquote => "blockquote",
            NodeKind::ListItem => "listItem",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::InlineCode => "inlineCode",
            NodeKind::Link => "link",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
