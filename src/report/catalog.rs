//! Message templates for pipeline errors.
//!
//! Every fragment of a [`PipelineError`](super::PipelineError) is identified by
//! a key from one of the closed enums below. Each key resolves to a static
//! [`Template`] whose text may contain `{name}` placeholders; the parameters a
//! template uses are declared next to its text.

use std::fmt;

/// Where users are sent to report schema mismatches and request block types.
pub const ISSUE_TRACKER_URL: &str = "https://github.com/pagesource/pagesource/issues/new";

/// A link attached to a remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    /// Link label
    pub text: &'static str,
    /// Link target
    pub href: &'static str,
}

/// A registered message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Stable identifier
    pub key: &'static str,
    /// Message text with `{name}` placeholders
    pub text: &'static str,
    /// Parameters the text requires
    pub params: &'static [&'static str],
    /// Optional reference link
    pub action: Option<Action>,
}

const OPEN_ISSUE: Action = Action {
    text: "Open an issue",
    href: ISSUE_TRACKER_URL,
};

/// Category of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FragmentKind {
    /// What operation failed
    Event,
    /// Why it failed
    Explanation,
    /// What to do about it
    Remediation,
}

/// Operations that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKey {
    /// Querying or mapping the record collection failed
    FetchRecordsFailed,
    /// Listing or mapping the blocks of one page failed
    FetchPageContentFailed,
    /// Walking a document tree into output elements failed
    RenderingFailed,
}

impl EventKey {
    /// All event keys.
    pub const ALL: [EventKey; 3] = [
        EventKey::FetchRecordsFailed,
        EventKey::FetchPageContentFailed,
        EventKey::RenderingFailed,
    ];

    /// Resolve the template for this key.
    pub fn template(self) -> &'static Template {
        match self {
            EventKey::FetchRecordsFailed => &Template {
                key: "fetching_records_failed",
                text: "fetching records failed",
                params: &[],
                action: None,
            },
            EventKey::FetchPageContentFailed => &Template {
                key: "fetching_page_content_failed",
                text: "fetching content for page `{page_id}` failed",
                params: &["page_id"],
                action: None,
            },
            EventKey::RenderingFailed => &Template {
                key: "rendering_failed",
                text: "rendering the document tree failed",
                params: &[],
                action: None,
            },
        }
    }
}

/// Causes of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplanationKey {
    /// A declared field has no value and no fallback
    MissingField,
    /// A field value does not match its validator's shape
    MalformedField,
    /// No rule is registered for a block discriminator
    UnsupportedBlockType,
    /// A block payload does not match its rule's shape
    MalformedBlock,
    /// The record source failed
    RecordQueryFailed,
    /// The block source failed
    BlockListFailed,
    /// The element map has no function for a node kind
    UnsupportedNode,
}

impl ExplanationKey {
    /// All explanation keys.
    pub const ALL: [ExplanationKey; 7] = [
        ExplanationKey::MissingField,
        ExplanationKey::MalformedField,
        ExplanationKey::UnsupportedBlockType,
        ExplanationKey::MalformedBlock,
        ExplanationKey::RecordQueryFailed,
        ExplanationKey::BlockListFailed,
        ExplanationKey::UnsupportedNode,
    ];

    /// Resolve the template for this key.
    pub fn template(self) -> &'static Template {
        match self {
            ExplanationKey::MissingField => &Template {
                key: "missing_field",
                text: "the {field_kind} field `{field_name}` is missing for record with ID `{record_id}`, and no fallback was provided",
                params: &["field_kind", "field_name", "record_id"],
                action: None,
            },
            ExplanationKey::MalformedField => &Template {
                key: "malformed_field",
                text: "parsing field `{field_name}` of record `{record_id}` failed because its value does not match the expected shape.\nCause: {reason}\n-- Data --\n{data}\n-- Data --",
                params: &["field_name", "record_id", "reason", "data"],
                action: None,
            },
            ExplanationKey::UnsupportedBlockType => &Template {
                key: "unsupported_block_type",
                text: "unsupported block type `{block_type}` is included in this page",
                params: &["block_type"],
                action: None,
            },
            ExplanationKey::MalformedBlock => &Template {
                key: "malformed_block",
                text: "block of type `{block_type}` does not match its expected shape: {reason}",
                params: &["block_type", "reason"],
                action: None,
            },
            ExplanationKey::RecordQueryFailed => &Template {
                key: "record_query_failed",
                text: "the record source failed to query collection `{collection_id}`:\n{error}",
                params: &["collection_id", "error"],
                action: None,
            },
            ExplanationKey::BlockListFailed => &Template {
                key: "block_list_failed",
                text: "the block source failed to list the blocks of page `{page_id}`:\n{error}",
                params: &["page_id", "error"],
                action: None,
            },
            ExplanationKey::UnsupportedNode => &Template {
                key: "unsupported_node",
                text: "no rendering function is mapped for node kind `{node_kind}`",
                params: &["node_kind"],
                action: None,
            },
        }
    }
}

/// Actionable next steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemediationKey {
    /// Fill in the field on the source page
    AddMissingField,
    /// Declare a fallback on the rule
    ProvideFallback,
    /// Opt into dropping failing records
    EnableSkipFailing,
    /// Report a schema mismatch
    OpenIssue,
    /// Delete the block from the page
    RemoveUnsupportedBlock,
    /// Ask for a new block rule
    RequestBlockSupport,
    /// Opt into dropping unsupported blocks
    AllowUnknownBlocks,
    /// Extend the element map
    MapNodeKind,
}

impl RemediationKey {
    /// All remediation keys.
    pub const ALL: [RemediationKey; 8] = [
        RemediationKey::AddMissingField,
        RemediationKey::ProvideFallback,
        RemediationKey::EnableSkipFailing,
        RemediationKey::OpenIssue,
        RemediationKey::RemoveUnsupportedBlock,
        RemediationKey::RequestBlockSupport,
        RemediationKey::AllowUnknownBlocks,
        RemediationKey::MapNodeKind,
    ];

    /// Resolve the template for this key.
    pub fn template(self) -> &'static Template {
        match self {
            RemediationKey::AddMissingField => &Template {
                key: "add_missing_field",
                text: "add the missing {field_kind} value `{field_name}` on the source page",
                params: &["field_kind", "field_name"],
                action: None,
            },
            RemediationKey::ProvideFallback => &Template {
                key: "provide_fallback",
                text: "add a fallback to the rule reading `{field_name}` with `FieldRule::with_fallback`, or a `fallback` entry in its rules file",
                params: &["field_name"],
                action: None,
            },
            RemediationKey::EnableSkipFailing => &Template {
                key: "enable_skip_failing",
                text: "to leave out records with missing fields instead, fetch with `FetchOptions::new().with_skip_failing(true)`",
                params: &[],
                action: None,
            },
            RemediationKey::OpenIssue => &Template {
                key: "open_issue",
                text: "the source returned a shape pagesource does not understand; open an issue for this",
                params: &[],
                action: Some(OPEN_ISSUE),
            },
            RemediationKey::RemoveUnsupportedBlock => &Template {
                key: "remove_unsupported_block",
                text: "remove the unsupported block from the page",
                params: &[],
                action: None,
            },
            RemediationKey::RequestBlockSupport => &Template {
                key: "request_block_support",
                text: "request support for this block type by opening an issue",
                params: &[],
                action: Some(OPEN_ISSUE),
            },
            RemediationKey::AllowUnknownBlocks => &Template {
                key: "allow_unknown_blocks",
                text: "to drop unsupported blocks instead of failing, enable `allow_unknown_block_types`",
                params: &[],
                action: None,
            },
            RemediationKey::MapNodeKind => &Template {
                key: "map_node_kind",
                text: "add a rendering function for `{node_kind}` to the element map",
                params: &["node_kind"],
                action: None,
            },
        }
    }
}

/// Reference to any registered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKey {
    /// An event template
    Event(EventKey),
    /// An explanation template
    Explanation(ExplanationKey),
    /// A remediation template
    Remediation(RemediationKey),
}

impl FragmentKey {
    /// Category of the referenced template.
    pub fn kind(self) -> FragmentKind {
        match self {
            FragmentKey::Event(_) => FragmentKind::Event,
            FragmentKey::Explanation(_) => FragmentKind::Explanation,
            FragmentKey::Remediation(_) => FragmentKind::Remediation,
        }
    }

    /// Resolve the referenced template.
    pub fn template(self) -> &'static Template {
        match self {
            FragmentKey::Event(key) => key.template(),
            FragmentKey::Explanation(key) => key.template(),
            FragmentKey::Remediation(key) => key.template(),
        }
    }

    /// Every key in the catalog.
    pub fn all() -> impl Iterator<Item = FragmentKey> {
        EventKey::ALL
            .into_iter()
            .map(FragmentKey::Event)
            .chain(ExplanationKey::ALL.into_iter().map(FragmentKey::Explanation))
            .chain(RemediationKey::ALL.into_iter().map(FragmentKey::Remediation))
    }
}

impl From<EventKey> for FragmentKey {
    fn from(key: EventKey) -> Self {
        FragmentKey::Event(key)
    }
}

impl From<ExplanationKey> for FragmentKey {
    fn from(key: ExplanationKey) -> Self {
        FragmentKey::Explanation(key)
    }
}

impl From<RemediationKey> for FragmentKey {
    fn from(key: RemediationKey) -> Self {
        FragmentKey::Remediation(key)
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template().key)
    }
}
