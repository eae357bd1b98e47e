//! Loading rule sets from JSON.
//!
//! ```json
//! {
//!   "title": { "property": "Page", "kind": "title" },
//!   "cover": { "property": "Image", "kind": "url", "fallback": "https://example.com/c.png" }
//! }
//! ```
//!
//! Rules keep the order in which they appear in the document.

use super::{FieldRule, RuleSet};
use crate::error::Result;
use crate::model::FieldValue;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleConfig {
    property: String,
    kind: String,
    #[serde(default)]
    fallback: Option<FieldValue>,
}

impl RuleConfig {
    fn into_rule(self) -> Result<FieldRule> {
        let rule = FieldRule::new(self.property, self.kind.parse()?);
        match self.fallback {
            Some(fallback) => rule.with_fallback(fallback),
            None => Ok(rule),
        }
    }
}

impl RuleSet {
    /// Parse a rule set from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let configs: IndexMap<String, RuleConfig> = serde_json::from_str(json)?;
        Self::from_configs(configs)
    }

    /// Parse a rule set from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let configs: IndexMap<String, RuleConfig> = serde_json::from_reader(reader)?;
        Self::from_configs(configs)
    }

    /// Load a rule set from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_configs(configs: IndexMap<String, RuleConfig>) -> Result<Self> {
        let mut rules = RuleSet::new();
        for (name, config) in configs {
            rules.insert(name, config.into_rule()?)?;
        }
        Ok(rules)
    }
}
