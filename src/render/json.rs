//! JSON rendering for document trees and typed records.

use crate::error::{Error, Result};
use crate::model::{DocumentTree, TypedRecord};
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document tree to JSON.
pub fn to_json(tree: &DocumentTree, format: JsonFormat) -> Result<String> {
    serialize(tree, format)
}

/// Convert typed records to a JSON array.
pub fn records_to_json(records: &[TypedRecord], format: JsonFormat) -> Result<String> {
    serialize(records, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
