//! Block extraction rules and their registry.
//!
//! Each [`BlockRule`] turns the payload of one block type into document
//! nodes. The [`BlockRegistry`] maps block type discriminators to rules; block
//! types without a registered rule are unsupported.
//!
//! # Example
//!
//! ```
//! use pagesource::blocks::BlockRegistry;
//!
//! let registry = BlockRegistry::with_defaults();
//! assert!(registry.supports("paragraph"));
//! assert!(!registry.supports("table"));
//! ```

mod rules;

pub use rules::{CodeBlock, FileRef, ImageBlock, ImageSource, TextBlock};

use crate::model::Node;
use crate::schema::Malformed;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Trait for block extraction rules.
///
/// Implement this trait to support an additional block type.
pub trait BlockRule: Send + Sync {
    /// The block type discriminator this rule handles.
    fn block_type(&self) -> &str;

    /// Convert a block payload into nodes.
    ///
    /// Returns [`Malformed`] if the payload does not have the expected shape.
    fn apply(&self, payload: &Value) -> Result<Vec<Node>, Malformed>;
}

/// A rule that deserializes the payload into a shape `S`, then maps the shape
/// to nodes.
pub struct ShapeRule<S> {
    block_type: &'static str,
    map: fn(S) -> Vec<Node>,
}

impl<S> ShapeRule<S> {
    /// Create a rule from a block type and a mapping function.
    pub fn new(block_type: &'static str, map: fn(S) -> Vec<Node>) -> Self {
        Self { block_type, map }
    }
}

impl<S: DeserializeOwned> BlockRule for ShapeRule<S> {
    fn block_type(&self) -> &str {
        self.block_type
    }

    fn apply(&self, payload: &Value) -> Result<Vec<Node>, Malformed> {
        let shape = S::deserialize(payload).map_err(|e| Malformed::new(e.to_string()))?;
        Ok((self.map)(shape))
    }
}

/// Registry of block rules keyed by block type.
#[derive(Clone)]
pub struct BlockRegistry {
    rules: HashMap<String, Arc<dyn BlockRule>>,
}

impl BlockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Create a registry with the built-in rules.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for rule in rules::default_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Register a rule, replacing any rule for the same block type.
    pub fn register(&mut self, rule: Arc<dyn BlockRule>) {
        self.rules.insert(rule.block_type().to_string(), rule);
    }

    /// Get the rule for a block type.
    pub fn get(&self, block_type: &str) -> Option<&dyn BlockRule> {
        self.rules.get(block_type).map(|rule| rule.as_ref())
    }

    /// Check if a block type is supported.
    pub fn supports(&self, block_type: &str) -> bool {
        self.rules.contains_key(block_type)
    }

    /// Get all supported block types, sorted.
    pub fn supported_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.rules.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("types", &self.supported_types())
            .finish()
    }
}
