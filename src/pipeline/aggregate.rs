//! Partial-failure policy across a collection.

use super::FetchOptions;
use crate::model::{DocumentTree, TypedRecord};
use crate::Outcome;
use rayon::prelude::*;

/// Combine per-record outcomes into one.
///
/// With `skip_failing`, failures are dropped and the successes kept in input
/// order. Otherwise the first failure in input order is returned unchanged.
pub fn aggregate<T>(
    outcomes: impl IntoIterator<Item = Outcome<T>>,
    skip_failing: bool,
) -> Outcome<Vec<T>> {
    if !skip_failing {
        return outcomes.into_iter().collect();
    }

    let mut kept = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(value) => kept.push(value),
            Err(error) => {
                log::warn!(
                    "Skipping record {}: {}",
                    error.param("record_id").or(error.param("page_id")).unwrap_or("?"),
                    error.events().map(|e| e.template().key).collect::<Vec<_>>().join(", ")
                );
            }
        }
    }
    Ok(kept)
}

/// Attach page content to each record.
///
/// `fetch` is called once per record id. With `options.max_concurrency`
/// greater than one, every page is fetched on a thread pool of that size and
/// the results are reassembled in input order. Sequential fetching stops at the
/// first content failure that ends the batch. A content failure aborts the
/// batch when `abort_on_content_failure` is set; otherwise it follows
/// `skip_failing`.
pub fn expand_content<F>(
    records: Vec<TypedRecord>,
    fetch: F,
    options: &FetchOptions,
) -> Outcome<Vec<TypedRecord>>
where
    F: Fn(&str) -> Outcome<DocumentTree> + Sync,
{
    if let Some(pool) = fetch_pool(records.len(), options.max_concurrency) {
        let contents: Vec<Outcome<DocumentTree>> =
            pool.install(|| records.par_iter().map(|r| fetch(&r.id)).collect());
        let outcomes = records
            .into_iter()
            .zip(contents)
            .map(|(record, content)| content.map(|tree| record.with_content(tree)));
        return settle(outcomes, options);
    }

    // Lazy: no page is fetched after a failure that ends the batch.
    let outcomes = records.into_iter().map(|record| {
        let content = fetch(&record.id);
        content.map(|tree| record.with_content(tree))
    });
    settle(outcomes, options)
}

fn settle(
    outcomes: impl Iterator<Item = Outcome<TypedRecord>>,
    options: &FetchOptions,
) -> Outcome<Vec<TypedRecord>> {
    if options.abort_on_content_failure {
        outcomes.collect()
    } else {
        aggregate(outcomes, options.skip_failing)
    }
}

fn fetch_pool(record_count: usize, max_concurrency: usize) -> Option<rayon::ThreadPool> {
    if max_concurrency <= 1 || record_count <= 1 {
        return None;
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(max_concurrency)
        .thread_name(|i| format!("pagesource-fetch-{}", i))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            log::warn!("Failed to build fetch pool, fetching sequentially: {}", e);
            None
        }
    }
}
