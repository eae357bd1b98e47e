//! Rendering module for converting document trees to various output formats.

mod json;
mod markdown;
mod options;
mod result;
mod text;
pub mod walker;

pub use json::{records_to_json, to_json, JsonFormat};
pub use markdown::{record_to_markdown, to_markdown, MarkdownElements, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{NodeCounts, RenderResult, Rendered};
pub use text::{to_text, TextElements};
pub use walker::{render_tree, ElementMap};
