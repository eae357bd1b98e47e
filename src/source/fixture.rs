//! A content source backed by a JSON snapshot.
//!
//! ```json
//! {
//!   "collections": { "posts": [ { "id": "p1", "properties": { ... } } ] },
//!   "pages": { "p1": [ { "type": "paragraph", "paragraph": { ... } } ] }
//! }
//! ```

use super::{BlockSource, FetchError, RecordSource};
use crate::error::Result;
use crate::model::{RawBlock, RawRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Records and blocks held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureSource {
    #[serde(default)]
    collections: IndexMap<String, Vec<RawRecord>>,
    #[serde(default)]
    pages: IndexMap<String, Vec<RawBlock>>,
}

impl FixtureSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Add or replace a collection.
    pub fn with_collection(mut self, id: impl Into<String>, records: Vec<RawRecord>) -> Self {
        self.collections.insert(id.into(), records);
        self
    }

    /// Add or replace the blocks of a page.
    pub fn with_page(mut self, id: impl Into<String>, blocks: Vec<RawBlock>) -> Self {
        self.pages.insert(id.into(), blocks);
        self
    }

    /// Collection ids in snapshot order.
    pub fn collection_ids(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Page ids in snapshot order.
    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

impl RecordSource for FixtureSource {
    fn query(&self, collection_id: &str) -> std::result::Result<Vec<RawRecord>, FetchError> {
        self.collections
            .get(collection_id)
            .cloned()
            .ok_or_else(|| FetchError::CollectionNotFound(collection_id.to_string()))
    }
}

impl BlockSource for FixtureSource {
    fn list_blocks(&self, page_id: &str) -> std::result::Result<Vec<RawBlock>, FetchError> {
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| FetchError::PageNotFound(page_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_from_json_str() {
        let source = FixtureSource::from_json_str(
            r#"{
                "collections": { "posts": [{ "id": "p1", "properties": {} }] },
                "pages": { "p1": [{ "type": "paragraph", "paragraph": { "rich_text": [] } }] }
            }"#,
        )
        .unwrap();

        assert_eq!(source.query("posts").unwrap().len(), 1);
        assert_eq!(source.list_blocks("p1").unwrap()[0].block_type, "paragraph");
        assert_eq!(source.collection_ids().collect::<Vec<_>>(), vec!["posts"]);
    }

    #[test]
    fn test_not_found() {
        let source = FixtureSource::new();
        assert_eq!(
            source.query("posts"),
            Err(FetchError::CollectionNotFound("posts".to_string()))
        );
        assert_eq!(
            source.list_blocks("p1"),
            Err(FetchError::PageNotFound("p1".to_string()))
        );
    }

    #[test]
    fn test_builder() {
        let source = FixtureSource::new()
            .with_collection("posts", vec![RawRecord::new("p1")])
            .with_page("p1", vec![RawBlock::new("quote", json!({ "rich_text": [] }))]);
        assert_eq!(source.page_ids().collect::<Vec<_>>(), vec!["p1"]);
    }

    #[test]
    fn test_invalid_json() {
        let err = FixtureSource::from_json_str(r#"{ "collections": [] }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
