//! Built-in field validators.
//!
//! Extraction is split in two steps. [`PropertyKind::validate`] checks the raw
//! JSON against the property's structure and yields a [`PropertyValue`];
//! [`PropertyValue::into_value`] maps that shape to a domain value, or `None`
//! when the field is currently empty.

use super::rich_text::RichText;
use super::{Extracted, Malformed};
use crate::error::Error;
use crate::model::{FieldValue, Person, ValueType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Kinds of fields a rule can extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Rich text; yields the first run's plain text
    RichText,
    /// Page title; yields the first run's plain text
    Title,
    /// URL
    Url,
    /// Checkbox; never absent
    Checkbox,
    /// Date; yields the start date string
    Date,
    /// Single select; yields the option name
    Select,
    /// Status; yields the option name
    Status,
    /// People; yields the user list
    People,
}

impl PropertyKind {
    /// All kinds.
    pub const ALL: [PropertyKind; 8] = [
        PropertyKind::RichText,
        PropertyKind::Title,
        PropertyKind::Url,
        PropertyKind::Checkbox,
        PropertyKind::Date,
        PropertyKind::Select,
        PropertyKind::Status,
        PropertyKind::People,
    ];

    /// Name of the kind as used by the source's `type` tag.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::RichText => "rich_text",
            PropertyKind::Title => "title",
            PropertyKind::Url => "url",
            PropertyKind::Checkbox => "checkbox",
            PropertyKind::Date => "date",
            PropertyKind::Select => "select",
            PropertyKind::Status => "status",
            PropertyKind::People => "people",
        }
    }

    /// The domain type values of this kind have.
    pub fn value_type(self) -> ValueType {
        match self {
            PropertyKind::Checkbox => ValueType::Bool,
            PropertyKind::People => ValueType::People,
            _ => ValueType::String,
        }
    }

    /// Check the structure of a raw value.
    pub fn validate(self, raw: &Value) -> Result<PropertyValue, Malformed> {
        let value = PropertyValue::deserialize(raw).map_err(|e| Malformed::new(e.to_string()))?;
        if value.kind() != self {
            return Err(Malformed::new(format!(
                "expected a `{}` value, found `{}`",
                self,
                value.kind()
            )));
        }
        Ok(value)
    }

    /// Validate and map a raw value.
    pub fn extract(self, raw: &Value) -> Result<Extracted, Malformed> {
        let value = self.validate(raw)?;
        Ok(match value.into_value() {
            Some(value) => Extracted::Present(value),
            None => Extracted::Absent,
        })
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(PropertyKind::RichText),
            _ => PropertyKind::ALL
                .into_iter()
                .find(|kind| kind.as_str() == s)
                .ok_or_else(|| Error::UnknownKind(s.to_string())),
        }
    }
}

/// A structurally valid property value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Rich text runs
    RichText {
        /// Runs
        rich_text: Vec<RichText>,
    },
    /// Title runs
    Title {
        /// Runs
        title: Vec<RichText>,
    },
    /// URL, possibly unset
    Url {
        /// URL
        url: Option<String>,
    },
    /// Checkbox state
    Checkbox {
        /// State
        checkbox: bool,
    },
    /// Date, possibly unset
    Date {
        /// Date range
        date: Option<DateRange>,
    },
    /// Select option, possibly unset
    Select {
        /// Option
        select: Option<SelectOption>,
    },
    /// Status option, possibly unset
    Status {
        /// Option
        status: Option<SelectOption>,
    },
    /// Referenced users
    People {
        /// Users
        people: Vec<Person>,
    },
}

/// A date or date range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateRange {
    /// Start date or datetime
    pub start: String,
    /// End date or datetime
    #[serde(default)]
    pub end: Option<String>,
    /// Time zone name
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// An option of a select or status field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    /// Option name
    pub name: String,
    /// Option identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Option color
    #[serde(default)]
    pub color: Option<String>,
}

impl PropertyValue {
    /// The kind named by the value's `type` tag.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::RichText { .. } => PropertyKind::RichText,
            PropertyValue::Title { .. } => PropertyKind::Title,
            PropertyValue::Url { .. } => PropertyKind::Url,
            PropertyValue::Checkbox { .. } => PropertyKind::Checkbox,
            PropertyValue::Date { .. } => PropertyKind::Date,
            PropertyValue::Select { .. } => PropertyKind::Select,
            PropertyValue::Status { .. } => PropertyKind::Status,
            PropertyValue::People { .. } => PropertyKind::People,
        }
    }

    /// Map to a domain value; `None` when the field is empty.
    pub fn into_value(self) -> Option<FieldValue> {
        match self {
            PropertyValue::RichText { rich_text: runs } | PropertyValue::Title { title: runs } => {
                runs.into_iter()
                    .next()
                    .map(|run| FieldValue::String(run.plain_text))
            }
            PropertyValue::Url { url } => url.map(FieldValue::String),
            PropertyValue::Checkbox { checkbox } => Some(FieldValue::Bool(checkbox)),
            PropertyValue::Date { date } => date.map(|d| FieldValue::String(d.start)),
            PropertyValue::Select { select: option } | PropertyValue::Status { status: option } => {
                option.map(|o| FieldValue::String(o.name))
            }
            PropertyValue::People { people } => {
                if people.is_empty() {
                    None
                } else {
                    Some(FieldValue::People(people))
                }
            }
        }
    }
}
