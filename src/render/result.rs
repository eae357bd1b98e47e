//! Rendering result with per-kind node counts.

use crate::model::NodeKind;
use std::collections::BTreeMap;

/// Running count of rendered nodes per kind.
///
/// Counts are the source of render keys: the `n`-th node of a kind (counting
/// from zero, in top-down document order) gets the key `"<kind>-<n>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeCounts {
    counts: BTreeMap<NodeKind, u32>,
}

impl NodeCounts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rendered nodes of a kind.
    pub fn get(&self, kind: NodeKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of rendered nodes.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Take the next key for `kind`, returning it with the advanced counts.
    pub fn next_key(mut self, kind: NodeKind) -> (String, Self) {
        let n = self.counts.entry(kind).or_insert(0);
        let key = format!("{}-{}", kind, n);
        *n += 1;
        (key, self)
    }
}

/// One rendered top-level node.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered<T> {
    /// Stable per-kind key
    pub key: String,
    /// Kind of the source node
    pub kind: NodeKind,
    /// Output of the element map
    pub output: T,
}

/// Result of rendering a document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult<T> {
    /// Rendered top-level nodes, in tree order
    pub elements: Vec<Rendered<T>>,

    /// Nodes rendered per kind, phrasing included
    pub counts: NodeCounts,
}

impl<T> RenderResult<T> {
    /// Outputs of the top-level nodes, in tree order.
    pub fn outputs(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().map(|e| &e.output)
    }

    /// Keys of the top-level nodes, in tree order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.key.as_str())
    }

    /// Consume the result, keeping only the outputs.
    pub fn into_outputs(self) -> Vec<T> {
        self.elements.into_iter().map(|e| e.output).collect()
    }
}
