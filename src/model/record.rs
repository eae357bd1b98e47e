//! Typed records and field values.

use super::DocumentTree;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A user referenced by a `people` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// User identifier
    pub id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// User type (e.g. "person", "bot")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,

    /// Type-specific details (e.g. `{"email": ...}`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Value>,
}

impl Person {
    /// Create a person with an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            avatar_url: None,
            user_type: None,
            person: None,
        }
    }

    /// Email address, if the source exposes one.
    pub fn email(&self) -> Option<&str> {
        self.person.as_ref()?.get("email")?.as_str()
    }

    /// Name if known, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A domain value produced by a field rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state
    Bool(bool),
    /// Text, URL, date, option name
    String(String),
    /// Referenced users
    People(Vec<Person>),
}

impl FieldValue {
    /// The domain type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            FieldValue::Bool(_) => ValueType::Bool,
            FieldValue::String(_) => ValueType::String,
            FieldValue::People(_) => ValueType::People,
        }
    }

    /// Get the string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the people value.
    pub fn as_people(&self) -> Option<&[Person]> {
        match self {
            FieldValue::People(p) => Some(p),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<Person>> for FieldValue {
    fn from(value: Vec<Person>) -> Self {
        FieldValue::People(value)
    }
}

/// Domain types a field rule can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// [`FieldValue::String`]
    String,
    /// [`FieldValue::Bool`]
    Bool,
    /// [`FieldValue::People`]
    People,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::People => "people",
        })
    }
}

/// A record with every declared field extracted.
///
/// Serializes flat: `{"id": .., "<field>": .., "content": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedRecord {
    /// Record identifier
    pub id: String,

    /// Extracted values keyed by mapped name, in rule-set order
    #[serde(flatten)]
    pub fields: IndexMap<String, FieldValue>,

    /// Page content, when content expansion was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<DocumentTree>,
}

impl TypedRecord {
    /// Keys a record serializes besides its fields.
    pub const RESERVED_KEYS: [&'static str; 2] = ["id", "content"];

    /// Create a record without fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
            content: None,
        }
    }

    /// Get a field value by mapped name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Get a string field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Get a boolean field.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// Get a people field.
    pub fn get_people(&self, name: &str) -> Option<&[Person]> {
        self.get(name).and_then(FieldValue::as_people)
    }

    /// Attach page content.
    pub fn with_content(mut self, content: DocumentTree) -> Self {
        self.content = Some(content);
        self
    }

    /// Convert the fields to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];
        lines.push(format!("id: \"{}\"", escape_yaml(&self.id)));

        for (name, value) in &self.fields {
            let rendered = match value {
                FieldValue::Bool(b) => b.to_string(),
                FieldValue::String(s) => format!("\"{}\"", escape_yaml(s)),
                FieldValue::People(people) => {
                    let names: Vec<String> = people
                        .iter()
                        .map(|p| format!("\"{}\"", escape_yaml(p.display_name())))
                        .collect();
                    format!("[{}]", names.join(", "))
                }
            };
            lines.push(format!("{}: {}", name, rendered));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
