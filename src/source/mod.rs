//! Boundary to the system that stores records and blocks.
//!
//! The pipeline only needs two operations from a content source: querying the
//! records of a collection and listing the blocks of a page. Retrieval,
//! authentication and retries are the implementor's concern.

mod fixture;

pub use fixture::FixtureSource;

use crate::model::{RawBlock, RawRecord};
use crate::report::{EventKey, ExplanationKey, Params, PipelineError};
use thiserror::Error;

/// Failure reported by a content source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The collection does not exist
    #[error("collection `{0}` not found")]
    CollectionNotFound(String),

    /// The page does not exist
    #[error("page `{0}` not found")]
    PageNotFound(String),

    /// Any other retrieval failure
    #[error("{0}")]
    Other(String),
}

/// Source of raw records.
pub trait RecordSource: Send + Sync {
    /// Query every record of a collection.
    fn query(&self, collection_id: &str) -> Result<Vec<RawRecord>, FetchError>;
}

/// Source of raw blocks.
pub trait BlockSource: Send + Sync {
    /// List the top-level blocks of a page, in page order.
    fn list_blocks(&self, page_id: &str) -> Result<Vec<RawBlock>, FetchError>;
}

pub(crate) fn query_failed(collection_id: &str, error: &FetchError) -> PipelineError {
    PipelineError::compose(
        &[
            EventKey::FetchRecordsFailed.into(),
            ExplanationKey::RecordQueryFailed.into(),
        ],
        &Params::new()
            .with("collection_id", collection_id)
            .with("error", error.to_string()),
    )
}

pub(crate) fn list_failed(page_id: &str, error: &FetchError) -> PipelineError {
    PipelineError::compose(
        &[
            EventKey::FetchPageContentFailed.into(),
            ExplanationKey::BlockListFailed.into(),
        ],
        &Params::new()
            .with("page_id", page_id)
            .with("error", error.to_string()),
    )
}
