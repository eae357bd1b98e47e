//! The content transformation pipeline.
//!
//! Raw records are mapped field by field ([`map_record`]), combined under the
//! partial-failure policy ([`aggregate`]) and optionally expanded with their
//! page content ([`expand_content`], [`map_blocks`]).

mod aggregate;
mod content;
mod fields;
mod options;

pub use aggregate::{aggregate, expand_content};
pub use content::map_blocks;
pub use fields::map_record;
pub use options::{ContentOptions, FetchOptions, FieldMode};

use crate::model::{RawRecord, TypedRecord};
use crate::schema::RuleSet;
use crate::Outcome;

/// Map every raw record of a collection and apply the partial-failure policy.
///
/// Content is not fetched here; see [`expand_content`].
pub fn map_records(
    records: &[RawRecord],
    rules: &RuleSet,
    options: &FetchOptions,
) -> Outcome<Vec<TypedRecord>> {
    let outcomes = records
        .iter()
        .map(|raw| map_record(&raw.id, rules, &raw.fields, options.field_mode));
    aggregate(outcomes, options.skip_failing)
}
