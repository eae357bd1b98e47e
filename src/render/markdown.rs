//! Markdown rendering for document trees.

use crate::error::Result;
use crate::model::{DocumentTree, NodeKind, TypedRecord};

use super::walker::{render_tree, ElementMap};
use super::{RenderOptions, RenderResult};

/// Convert a document tree to Markdown.
pub fn to_markdown(tree: &DocumentTree, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(tree)
}

/// Convert a typed record to Markdown.
///
/// The record's fields become YAML frontmatter when
/// [`RenderOptions::include_frontmatter`] is set; its content, if expanded,
/// becomes the body.
pub fn record_to_markdown(record: &TypedRecord, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    if options.include_frontmatter {
        output.push_str(&record.to_yaml_frontmatter());
    }

    if let Some(ref content) = record.content {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&to_markdown(content, options)?);
    }

    Ok(output.trim_end().to_string())
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    elements: MarkdownElements,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            elements: MarkdownElements::new(options),
        }
    }

    /// Render a tree to Markdown.
    pub fn render(mut self, tree: &DocumentTree) -> Result<String> {
        let result = render_tree(tree, &mut self.elements)?;
        Ok(join_blocks(&result))
    }

    /// Render a tree, keeping the per-node outputs and counts.
    pub fn render_with_counts(mut self, tree: &DocumentTree) -> Result<RenderResult<String>> {
        Ok(render_tree(tree, &mut self.elements)?)
    }
}

/// Separate top-level blocks by a blank line; keep consecutive list items tight.
fn join_blocks(result: &RenderResult<String>) -> String {
    let mut output = String::new();
    let mut previous: Option<NodeKind> = None;

    for element in &result.elements {
        if let Some(prev) = previous {
            if prev == NodeKind::ListItem && element.kind == NodeKind::ListItem {
                output.push('\n');
            } else {
                output.push_str("\n\n");
            }
        }
        output.push_str(&element.output);
        previous = Some(element.kind);
    }

    output.trim().to_string()
}

/// Element map producing Markdown strings.
#[derive(Debug, Clone)]
pub struct MarkdownElements {
    options: RenderOptions,
}

impl MarkdownElements {
    /// Create a Markdown element map.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ElementMap for MarkdownElements {
    type Output = String;

    fn paragraph(&mut self, _key: &str, children: Vec<String>) -> Option<String> {
        Some(children.concat())
    }

    fn heading(&mut self, _key: &str, depth: u8, children: Vec<String>) -> Option<String> {
        let level = depth.min(self.options.max_heading_level).max(1);
        Some(format!("{} {}", "#".repeat(level as usize), children.concat()))
    }

    fn code(
        &mut self,
        _key: &str,
        lang: Option<&str>,
        value: &str,
        caption: Option<&str>,
    ) -> Option<String> {
        let fence = code_fence(value);
        let mut output = format!("{}{}\n{}\n{}", fence, lang.unwrap_or(""), value, fence);
        if let Some(caption) = caption {
            output.push_str(&format!("\n\n*{}*", self.escape(caption)));
        }
        Some(output)
    }

    fn image(&mut self, _key: &str, url: &str, alt: Option<&str>) -> Option<String> {
        let alt = alt
            .or(self.options.image_alt_fallback.as_deref())
            .unwrap_or("");
        Some(format!("![{}]({})", self.escape(alt), url))
    }

    fn blockquote(&mut self, _key: &str, children: Vec<String>) -> Option<String> {
        let body = children.join("\n\n");
        Some(
            body.lines()
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {}", line)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn list_item(&mut self, _key: &str, ordered: bool, children: Vec<String>) -> Option<String> {
        let marker = if ordered {
            "1.".to_string()
        } else {
            self.options.list_marker.to_string()
        };
        let indent = " ".repeat(marker.len() + 1);
        let body = children.join("\n\n");

        let mut output = String::new();
        for (i, line) in body.lines().enumerate() {
            if i == 0 {
                output.push_str(&format!("{} {}", marker, line));
            } else if line.is_empty() {
                output.push('\n');
            } else {
                output.push_str(&format!("\n{}{}", indent, line));
            }
        }
        if output.is_empty() {
            output = marker;
        }
        Some(output)
    }

    fn text(&mut self, _key: &str, value: &str) -> Option<String> {
        Some(self.escape(value))
    }

    fn emphasis(&mut self, _key: &str, children: Vec<String>) -> Option<String> {
        Some(format!("*{}*", children.concat()))
    }

    fn strong(&mut self, _key: &str, children: Vec<String>) -> Option<String> {
        Some(format!("**{}**", children.concat()))
    }

    fn inline_code(&mut self, _key: &str, value: &str) -> Option<String> {
        if value.contains('`') {
            Some(format!("`` {} ``", value))
        } else {
            Some(format!("`{}`", value))
        }
    }

    fn link(&mut self, _key: &str, url: &str, children: Vec<String>) -> Option<String> {
        Some(format!("[{}]({})", children.concat(), url))
    }
}

impl MarkdownElements {
    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// A backtick fence longer than any backtick run in `value`.
fn code_fence(value: &str) -> String {
    let longest = value
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
