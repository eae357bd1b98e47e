//! Block-to-document mapping.

use crate::blocks::BlockRegistry;
use crate::model::{DocumentTree, RawBlock};
use crate::report::{EventKey, ExplanationKey, FragmentKey, Params, PipelineError, RemediationKey};
use crate::schema::Malformed;
use crate::Outcome;

const BLOCK_REMEDIATIONS: [FragmentKey; 3] = [
    FragmentKey::Remediation(RemediationKey::RemoveUnsupportedBlock),
    FragmentKey::Remediation(RemediationKey::RequestBlockSupport),
    FragmentKey::Remediation(RemediationKey::AllowUnknownBlocks),
];

/// Map the ordered blocks of a page to a document tree.
///
/// Blocks without a registered rule, and blocks whose payload does not match
/// their rule, are dropped when `allow_unknown` is set. Otherwise the first
/// such block fails the whole page.
pub fn map_blocks(
    page_id: &str,
    blocks: &[RawBlock],
    registry: &BlockRegistry,
    allow_unknown: bool,
) -> Outcome<DocumentTree> {
    let mut tree = DocumentTree::new();

    for block in blocks {
        let Some(rule) = registry.get(&block.block_type) else {
            if allow_unknown {
                log::debug!(
                    "Dropping unsupported block type '{}' on page {}",
                    block.block_type,
                    page_id
                );
                continue;
            }
            return Err(unsupported_block(page_id, &block.block_type));
        };

        let mapped = match block.payload() {
            Some(payload) => rule.apply(payload),
            None => Err(Malformed::new(format!(
                "missing `{}` payload",
                block.block_type
            ))),
        };

        match mapped {
            Ok(nodes) => tree.children.extend(nodes),
            Err(malformed) if allow_unknown => {
                log::debug!(
                    "Dropping malformed '{}' block on page {}: {}",
                    block.block_type,
                    page_id,
                    malformed.reason
                );
            }
            Err(malformed) => {
                return Err(malformed_block(page_id, &block.block_type, &malformed.reason))
            }
        }
    }

    log::debug!("Mapped page {} to {} nodes", page_id, tree.len());
    Ok(tree)
}

fn unsupported_block(page_id: &str, block_type: &str) -> PipelineError {
    let mut keys: Vec<FragmentKey> = vec![
        EventKey::FetchPageContentFailed.into(),
        ExplanationKey::UnsupportedBlockType.into(),
    ];
    keys.extend(BLOCK_REMEDIATIONS);

    PipelineError::compose(
        &keys,
        &Params::new()
            .with("page_id", page_id)
            .with("block_type", block_type),
    )
}

fn malformed_block(page_id: &str, block_type: &str, reason: &str) -> PipelineError {
    let mut keys: Vec<FragmentKey> = vec![
        EventKey::FetchPageContentFailed.into(),
        ExplanationKey::MalformedBlock.into(),
    ];
    keys.extend(BLOCK_REMEDIATIONS);

    PipelineError::compose(
        &keys,
        &Params::new()
            .with("page_id", page_id)
            .with("block_type", block_type)
            .with("reason", reason),
    )
}
