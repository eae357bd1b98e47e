//! Rich text runs shared by field values and block payloads.

use crate::model::Phrasing;
use serde::Deserialize;

/// One run of rich text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichText {
    /// Text content and link, for runs of type `text`
    #[serde(default)]
    pub text: Option<TextContent>,

    /// Styling flags
    #[serde(default)]
    pub annotations: Annotations,

    /// Unformatted text of the run
    pub plain_text: String,

    /// Target of mentions and links
    #[serde(default)]
    pub href: Option<String>,
}

/// Text content of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextContent {
    /// Text
    pub content: String,

    /// Inline link
    #[serde(default)]
    pub link: Option<LinkTarget>,
}

/// Target of an inline link.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkTarget {
    /// Link URL
    pub url: String,
}

/// Styling flags of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Annotations {
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Strikethrough
    pub strikethrough: bool,
    /// Underline
    pub underline: bool,
    /// Inline code
    pub code: bool,
}

impl RichText {
    /// Convert the run to a phrasing node.
    ///
    /// Precedence is link, then inline code, then bold and italic. Bold and
    /// italic nest (`strong > emphasis`) instead of one hiding the other, and
    /// link text keeps both. Inline code carries no nested styling, so a bold
    /// code run stays inline code.
    pub fn to_phrasing(&self) -> Phrasing {
        if let Some(TextContent {
            content,
            link: Some(link),
        }) = &self.text
        {
            return Phrasing::Link {
                url: link.url.clone(),
                children: vec![self.styled(content)],
            };
        }

        if self.annotations.code {
            return Phrasing::InlineCode {
                value: self.plain_text.clone(),
            };
        }

        self.styled(&self.plain_text)
    }

    fn styled(&self, value: &str) -> Phrasing {
        let mut node = Phrasing::text(value);
        if self.annotations.italic {
            node = Phrasing::Emphasis {
                children: vec![node],
            };
        }
        if self.annotations.bold {
            node = Phrasing::Strong {
                children: vec![node],
            };
        }
        node
    }
}

/// Convert a list of runs to phrasing nodes.
pub fn to_phrasing(runs: &[RichText]) -> Vec<Phrasing> {
    runs.iter().map(RichText::to_phrasing).collect()
}

/// Concatenate the plain text of runs.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|run| run.plain_text.as_str()).collect()
}
