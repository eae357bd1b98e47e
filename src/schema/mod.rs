//! Declarative field extraction rules.
//!
//! A [`FieldRule`] names a source field, the kind of value expected there,
//! and an optional fallback. A [`RuleSet`] maps output names to rules and is
//! applied to each record by the record field mapper.
//!
//! # Example
//!
//! ```
//! use pagesource::schema::{shorthand, RuleSet};
//!
//! let rules = RuleSet::new()
//!     .field("title", shorthand::title("Page"))
//!     .field("slug", shorthand::text("Slug"))
//!     .field("featured", shorthand::checkbox("Featured"))
//!     .field("cover", shorthand::url("Image").with_fallback("https://example.com/cover.png")?);
//!
//! assert_eq!(rules.len(), 4);
//! # Ok::<(), pagesource::Error>(())
//! ```

mod config;
mod properties;
pub mod rich_text;
pub mod shorthand;

pub use properties::{DateRange, PropertyKind, PropertyValue, SelectOption};
pub use crate::model::ValueType;

use crate::error::{Error, Result};
use crate::model::{FieldValue, TypedRecord};
use crate::report::{EventKey, ExplanationKey, Params, PipelineError, RemediationKey};
use crate::Outcome;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Result of validating a present raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// The field holds a usable value
    Present(FieldValue),
    /// The field exists but is currently empty
    Absent,
}

/// A raw value that does not have the structure its kind requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    /// Description of the structural mismatch
    pub reason: String,
}

impl Malformed {
    /// Create a new mismatch description.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Extraction rule for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    source: String,
    kind: PropertyKind,
    fallback: Option<FieldValue>,
}

impl FieldRule {
    /// Create a rule reading `source` as `kind`.
    pub fn new(source: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            source: source.into(),
            kind,
            fallback: None,
        }
    }

    /// Use `fallback` when the field is absent.
    ///
    /// Fails with [`Error::InvalidFallback`] if the value does not have the
    /// domain type of the rule's kind.
    pub fn with_fallback(mut self, fallback: impl Into<FieldValue>) -> Result<Self> {
        let fallback = fallback.into();
        if fallback.value_type() != self.kind.value_type() {
            return Err(Error::InvalidFallback {
                field: self.source,
                kind: self.kind,
                expected: self.kind.value_type(),
                found: fallback.value_type(),
            });
        }
        self.fallback = Some(fallback);
        Ok(self)
    }

    /// Source field name.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Expected kind.
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Fallback value, if any.
    pub fn fallback(&self) -> Option<&FieldValue> {
        self.fallback.as_ref()
    }

    /// Extract this rule's value from a record's raw fields.
    ///
    /// A field missing from `fields` altogether counts as absent.
    pub fn apply(&self, record_id: &str, fields: &Map<String, Value>) -> Outcome<FieldValue> {
        let raw = fields.get(&self.source);
        let extracted = match raw {
            Some(raw) => self.kind.extract(raw),
            None => Ok(Extracted::Absent),
        };

        match extracted {
            Ok(Extracted::Present(value)) => Ok(value),
            Ok(Extracted::Absent) => match &self.fallback {
                Some(fallback) => Ok(fallback.clone()),
                None => Err(self.missing_error(record_id)),
            },
            Err(malformed) => Err(self.malformed_error(record_id, &malformed, raw)),
        }
    }

    fn missing_error(&self, record_id: &str) -> PipelineError {
        PipelineError::compose(
            &[
                EventKey::FetchRecordsFailed.into(),
                ExplanationKey::MissingField.into(),
                RemediationKey::ProvideFallback.into(),
                RemediationKey::AddMissingField.into(),
                RemediationKey::EnableSkipFailing.into(),
            ],
            &Params::new()
                .with("field_kind", self.kind.as_str())
                .with("field_name", self.source.as_str())
                .with("record_id", record_id),
        )
    }

    fn malformed_error(
        &self,
        record_id: &str,
        malformed: &Malformed,
        raw: Option<&Value>,
    ) -> PipelineError {
        let data = raw
            .map(|v| serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()))
            .unwrap_or_default();

        PipelineError::compose(
            &[
                EventKey::FetchRecordsFailed.into(),
                ExplanationKey::MalformedField.into(),
                RemediationKey::OpenIssue.into(),
            ],
            &Params::new()
                .with("field_name", self.source.as_str())
                .with("record_id", record_id)
                .with("reason", malformed.reason.as_str())
                .with("data", data),
        )
    }
}

/// Named field rules, applied in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: IndexMap<String, FieldRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule under an output name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is one of [`TypedRecord::RESERVED_KEYS`]. Use
    /// [`RuleSet::insert`] to handle that case as an error.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        if let Err(e) = self.insert(name, rule) {
            panic!("{}", e);
        }
        self
    }

    /// Add or replace a rule under an output name.
    ///
    /// Fails with [`Error::ReservedFieldName`] for `id` and `content`, which
    /// typed records use for their own keys.
    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) -> Result<()> {
        let name = name.into();
        if TypedRecord::RESERVED_KEYS.contains(&name.as_str()) {
            return Err(Error::ReservedFieldName(name));
        }
        self.rules.insert(name, rule);
        Ok(())
    }

    /// Get a rule by output name.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules.get(name)
    }

    /// Iterate over `(output name, rule)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the rule set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_apply_present() {
        let rule = FieldRule::new("Slug", PropertyKind::RichText);
        let raw = fields(json!({
            "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "hello" }] }
        }));
        assert_eq!(rule.apply("r1", &raw).unwrap(), "hello".into());
    }

    #[test]
    fn test_absent_uses_fallback() {
        let rule = FieldRule::new("Image", PropertyKind::Url)
            .with_fallback("https://example.com/x.png")
            .unwrap();
        let raw = fields(json!({ "Image": { "type": "url", "url": null } }));
        assert_eq!(
            rule.apply("r1", &raw).unwrap(),
            "https://example.com/x.png".into()
        );
        assert_eq!(
            rule.apply("r1", &Map::new()).unwrap(),
            "https://example.com/x.png".into()
        );
    }

    #[test]
    fn test_absent_without_fallback() {
        let rule = FieldRule::new("Page", PropertyKind::Title);
        let raw = fields(json!({ "Page": { "type": "title", "title": [] } }));
        let err = rule.apply("rec-9", &raw).unwrap_err();

        assert!(err.has_event(EventKey::FetchRecordsFailed));
        assert!(err.has_explanation(ExplanationKey::MissingField));
        assert!(err.has_remediation(RemediationKey::ProvideFallback));
        assert!(err.has_remediation(RemediationKey::AddMissingField));
        assert_eq!(err.param("field_name"), Some("Page"));
        assert_eq!(err.param("record_id"), Some("rec-9"));
        assert_eq!(err.param("field_kind"), Some("title"));
    }

    #[test]
    fn test_fallback_hint_for_rich_text() {
        let rule = FieldRule::new("Slug", PropertyKind::RichText);
        let err = rule.apply("rec-9", &Map::new()).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("`Slug` with `FieldRule::with_fallback`"));
        assert!(!message.contains("rich_text(\""));
    }

    #[test]
    fn test_malformed_points_at_issue() {
        let rule = FieldRule::new("Featured", PropertyKind::Checkbox)
            .with_fallback(false)
            .unwrap();
        let raw = fields(json!({ "Featured": { "type": "checkbox", "checkbox": "yes" } }));
        let err = rule.apply("r1", &raw).unwrap_err();

        assert!(err.has_explanation(ExplanationKey::MalformedField));
        assert!(err.has_remediation(RemediationKey::OpenIssue));
        assert!(!err.has_remediation(RemediationKey::ProvideFallback));
        assert!(err.param("data").unwrap().contains("\"yes\""));
        assert_eq!(err.param("field_name"), Some("Featured"));
    }

    #[test]
    fn test_fallback_type_checked() {
        let err = FieldRule::new("Featured", PropertyKind::Checkbox)
            .with_fallback("yes")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFallback {
                expected: ValueType::Bool,
                found: ValueType::String,
                ..
            }
        ));
    }

    #[test]
    fn test_reserved_names_rejected() {
        let mut rules = RuleSet::new();
        for name in ["id", "content"] {
            let err = rules
                .insert(name, FieldRule::new("Slug", PropertyKind::RichText))
                .unwrap_err();
            assert!(matches!(err, Error::ReservedFieldName(ref n) if n == name));
        }
        assert!(rules.is_empty());
        assert!(rules
            .insert("slug", FieldRule::new("Slug", PropertyKind::RichText))
            .is_ok());
    }

    #[test]
    #[should_panic(expected = "reserved")]
    fn test_reserved_name_in_builder_panics() {
        let _ = RuleSet::new().field("id", FieldRule::new("Slug", PropertyKind::RichText));
    }

    #[test]
    fn test_rule_set_order() {
        let rules = RuleSet::new()
            .field("b", FieldRule::new("B", PropertyKind::Url))
            .field("a", FieldRule::new("A", PropertyKind::Url));
        let names: Vec<&str> = rules.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(rules.get("a").map(FieldRule::source), Some("A"));
    }
}
