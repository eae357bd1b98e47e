//! # pagesource
//!
//! Schema-driven content pipeline for block-based page collections.
//!
//! This library takes raw records and content blocks from a content source
//! and turns them into typed, user-named fields and a generic document tree
//! that can be rendered into Markdown, plain text, JSON or any custom output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagesource::schema::{shorthand, RuleSet};
//! use pagesource::{ContentSource, FetchOptions, FixtureSource};
//!
//! fn main() -> pagesource::Result<()> {
//!     let source = FixtureSource::from_path("snapshot.json")?;
//!     let rules = RuleSet::new()
//!         .field("title", shorthand::title("Page"))
//!         .field("slug", shorthand::text("Slug"));
//!
//!     let records = ContentSource::new(source, "posts", rules)
//!         .fetch_records(&FetchOptions::new().with_content(true))?;
//!
//!     for record in &records {
//!         println!("{}", pagesource::render::record_to_markdown(record, &Default::default())?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Declarative field rules**: per-field kind, source name and fallback
//! - **Block registry**: extensible block-type-to-node rules
//! - **Partial failure policy**: fail fast or skip failing records
//! - **Actionable errors**: every failure explains what happened and what to do
//! - **Bounded concurrency**: page content fetched on a Rayon pool

pub mod blocks;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod schema;
pub mod source;

// Re-export commonly used types
pub use blocks::{BlockRegistry, BlockRule};
pub use error::{Error, Result};
pub use model::{DocumentTree, FieldValue, Node, Phrasing, RawBlock, RawRecord, TypedRecord};
pub use pipeline::{ContentOptions, FetchOptions, FieldMode};
pub use render::{JsonFormat, RenderOptions};
pub use report::PipelineError;
pub use schema::{FieldRule, RuleSet};
pub use source::{BlockSource, FetchError, FixtureSource, RecordSource};

/// Outcome of a pipeline operation: a payload or a structured failure.
pub type Outcome<T> = std::result::Result<T, PipelineError>;

/// A collection of a content source, mapped through a rule set.
///
/// # Example
///
/// ```
/// use pagesource::schema::{shorthand, RuleSet};
/// use pagesource::{ContentOptions, ContentSource, FixtureSource, RawBlock};
/// use serde_json::json;
///
/// let source = FixtureSource::new().with_page(
///     "p1",
///     vec![RawBlock::new("paragraph", json!({ "rich_text": [{ "plain_text": "hi" }] }))],
/// );
/// let content = ContentSource::new(source, "posts", RuleSet::new());
///
/// let tree = content.fetch_page_content("p1", &ContentOptions::default())?;
/// assert_eq!(tree.plain_text(), "hi");
/// # Ok::<(), pagesource::PipelineError>(())
/// ```
pub struct ContentSource<S> {
    source: S,
    collection_id: String,
    rules: RuleSet,
    registry: BlockRegistry,
}

impl<S: RecordSource + BlockSource> ContentSource<S> {
    /// Create a content source for one collection, with the built-in block rules.
    pub fn new(source: S, collection_id: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            source,
            collection_id: collection_id.into(),
            rules,
            registry: BlockRegistry::with_defaults(),
        }
    }

    /// Replace the block registry.
    pub fn with_registry(mut self, registry: BlockRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The collection id.
    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// The field rules.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The block registry.
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Fetch and map every record of the collection.
    ///
    /// Records are returned in source order. See [`FetchOptions`] for the
    /// partial-failure policy and content expansion.
    pub fn fetch_records(&self, options: &FetchOptions) -> Outcome<Vec<TypedRecord>> {
        let raw = self
            .source
            .query(&self.collection_id)
            .map_err(|e| source::query_failed(&self.collection_id, &e))?;
        log::info!(
            "Fetched {} records from collection {}",
            raw.len(),
            self.collection_id
        );

        let records = pipeline::map_records(&raw, &self.rules, options)?;
        log::info!("Mapped {} of {} records", records.len(), raw.len());

        if !options.expand_content {
            return Ok(records);
        }

        let content_options = options.content_options();
        pipeline::expand_content(
            records,
            |page_id| self.fetch_page_content(page_id, &content_options),
            options,
        )
    }

    /// Fetch and map the content of one page.
    pub fn fetch_page_content(
        &self,
        page_id: &str,
        options: &ContentOptions,
    ) -> Outcome<DocumentTree> {
        let blocks = self
            .source
            .list_blocks(page_id)
            .map_err(|e| source::list_failed(page_id, &e))?;
        log::debug!("Fetched {} blocks for page {}", blocks.len(), page_id);

        pipeline::map_blocks(
            page_id,
            &blocks,
            &self.registry,
            options.allow_unknown_block_types,
        )
    }
}
