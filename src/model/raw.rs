//! Raw records and blocks as delivered by a content source.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record (page) from a collection, with its untyped field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Record identifier
    pub id: String,

    /// Field values keyed by source field name
    #[serde(alias = "properties", default)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    /// Create a record without fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Add a raw field value.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Get a raw field value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// A content block of a page.
///
/// The type-specific payload lives under the key equal to the block type,
/// e.g. `{"type": "paragraph", "paragraph": {"rich_text": [...]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Type discriminator
    #[serde(rename = "type")]
    pub block_type: String,

    /// Remaining keys of the block object, including the payload
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl RawBlock {
    /// Create a block with its payload.
    pub fn new(block_type: impl Into<String>, payload: Value) -> Self {
        let block_type = block_type.into();
        let mut body = Map::new();
        body.insert(block_type.clone(), payload);
        Self {
            id: None,
            block_type,
            body,
        }
    }

    /// Set the block identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The type-specific payload.
    pub fn payload(&self) -> Option<&Value> {
        self.body.get(&self.block_type)
    }
}
