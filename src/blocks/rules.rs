//! Built-in block rules.

use super::{BlockRule, ShapeRule};
use crate::model::Node;
use crate::schema::rich_text::{plain_text, to_phrasing, RichText};
use serde::Deserialize;
use std::sync::Arc;

/// Payload of text blocks (paragraphs, headings, list items, quotes).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextBlock {
    /// Text runs
    pub rich_text: Vec<RichText>,
}

/// Payload of `code` blocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CodeBlock {
    /// Language identifier
    #[serde(default)]
    pub language: Option<String>,
    /// Caption runs
    #[serde(default)]
    pub caption: Vec<RichText>,
    /// Code runs
    pub rich_text: Vec<RichText>,
}

/// Payload of `image` blocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageBlock {
    /// Caption runs; the first one becomes the alt text
    #[serde(default)]
    pub caption: Vec<RichText>,
    /// Where the image is hosted
    #[serde(flatten)]
    pub source: ImageSource,
}

/// Hosting of an image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    /// Externally hosted image
    External {
        /// Location
        external: FileRef,
    },
    /// Image uploaded to the source
    File {
        /// Location
        file: FileRef,
    },
}

/// Location of a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileRef {
    /// File URL
    pub url: String,
}

impl ImageSource {
    /// The image URL.
    pub fn url(&self) -> &str {
        match self {
            ImageSource::External { external: file } | ImageSource::File { file } => &file.url,
        }
    }
}

pub(super) fn default_rules() -> Vec<Arc<dyn BlockRule>> {
    vec![
        Arc::new(ShapeRule::new("paragraph", paragraph)),
        Arc::new(ShapeRule::new("heading_1", heading_1)),
        Arc::new(ShapeRule::new("heading_2", heading_2)),
        Arc::new(ShapeRule::new("heading_3", heading_3)),
        Arc::new(ShapeRule::new("bulleted_list_item", bulleted_list_item)),
        Arc::new(ShapeRule::new("numbered_list_item", numbered_list_item)),
        Arc::new(ShapeRule::new("quote", quote)),
        Arc::new(ShapeRule::new("code", code)),
        Arc::new(ShapeRule::new("image", image)),
    ]
}

fn paragraph(block: TextBlock) -> Vec<Node> {
    vec![Node::Paragraph {
        children: to_phrasing(&block.rich_text),
    }]
}

fn heading(depth: u8, block: TextBlock) -> Vec<Node> {
    vec![Node::Heading {
        depth,
        children: to_phrasing(&block.rich_text),
    }]
}

fn heading_1(block: TextBlock) -> Vec<Node> {
    heading(1, block)
}

fn heading_2(block: TextBlock) -> Vec<Node> {
    heading(2, block)
}

fn heading_3(block: TextBlock) -> Vec<Node> {
    heading(3, block)
}

fn list_item(ordered: bool, block: TextBlock) -> Vec<Node> {
    vec![Node::ListItem {
        ordered,
        children: paragraph(block),
    }]
}

fn bulleted_list_item(block: TextBlock) -> Vec<Node> {
    list_item(false, block)
}

fn numbered_list_item(block: TextBlock) -> Vec<Node> {
    list_item(true, block)
}

fn quote(block: TextBlock) -> Vec<Node> {
    vec![Node::Blockquote {
        children: paragraph(block),
    }]
}

fn code(block: CodeBlock) -> Vec<Node> {
    let caption = plain_text(&block.caption);
    vec![Node::Code {
        lang: block.language.filter(|lang| !lang.is_empty()),
        value: plain_text(&block.rich_text),
        caption: (!caption.is_empty()).then_some(caption),
    }]
}

fn image(block: ImageBlock) -> Vec<Node> {
    let alt = block
        .caption
        .first()
        .map(|run| run.plain_text.clone())
        .filter(|alt| !alt.is_empty());
    vec![Node::Image {
        url: block.source.url().to_string(),
        alt,
    }]
}
