//! Data model for source content and pipeline output.
//!
//! Raw types ([`RawRecord`], [`RawBlock`]) mirror what a content source
//! delivers. Typed types ([`TypedRecord`], [`DocumentTree`]) are what the
//! pipeline produces; they never contain raw values.

mod node;
mod raw;
mod record;
mod tree;

pub use node::{Node, NodeKind, Phrasing};
pub(crate) use node::phrasing_text;
pub use raw::{RawBlock, RawRecord};
pub use record::{FieldValue, Person, TypedRecord, ValueType};
pub use tree::DocumentTree;
