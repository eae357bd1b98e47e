//! Structured, human-readable pipeline errors.
//!
//! A [`PipelineError`] is an ordered list of fragments. Each fragment is an
//! *event* (what failed), an *explanation* (why) or a *remediation* (what to
//! do next), resolved from the template [`catalog`] and filled with its own
//! parameters.
//!
//! # Example
//!
//! ```
//! use pagesource::report::{EventKey, ExplanationKey, Params, PipelineError};
//!
//! let error = PipelineError::compose(
//!     &[
//!         EventKey::FetchPageContentFailed.into(),
//!         ExplanationKey::UnsupportedBlockType.into(),
//!     ],
//!     &Params::new()
//!         .with("page_id", "abc")
//!         .with("block_type", "table"),
//! );
//!
//! assert!(error.has_explanation(ExplanationKey::UnsupportedBlockType));
//! assert_eq!(error.param("block_type"), Some("table"));
//! assert!(error.to_string().contains("unsupported block type `table`"));
//! ```

pub mod catalog;

pub use catalog::{
    Action, EventKey, ExplanationKey, FragmentKey, FragmentKind, RemediationKey, Template,
    ISSUE_TRACKER_URL,
};

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn placeholder_regex() -> Option<&'static Regex> {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").ok())
        .as_ref()
}

/// Names of the `{name}` placeholders in a template text.
pub(crate) fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    placeholder_regex().into_iter().flat_map(move |re| {
        re.captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    })
}

/// String-keyed parameters for composing an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Look up a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// One resolved part of a [`PipelineError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    key: FragmentKey,
    params: BTreeMap<String, String>,
}

impl Fragment {
    fn resolve(key: FragmentKey, params: &Params) -> Self {
        let template = key.template();
        let params = template
            .params
            .iter()
            .map(|&name| match params.get(name) {
                Some(value) => (name.to_string(), value.to_string()),
                None => panic!(
                    "template `{}` requires parameter `{}`",
                    template.key, name
                ),
            })
            .collect();
        Self { key, params }
    }

    /// The template key.
    pub fn key(&self) -> FragmentKey {
        self.key
    }

    /// The fragment category.
    pub fn kind(&self) -> FragmentKind {
        self.key.kind()
    }

    /// A parameter value this fragment was filled with.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The reference link, if the template has one.
    pub fn action(&self) -> Option<Action> {
        self.key.template().action
    }

    /// The template text with parameters substituted.
    pub fn message(&self) -> String {
        let text = self.key.template().text;
        let Some(re) = placeholder_regex() else {
            return text.to_string();
        };
        re.replace_all(text, |caps: &Captures| {
            self.params
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
    }
}

/// A structured pipeline failure.
///
/// Always contains at least one event and one explanation. Values are
/// immutable once composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    fragments: Vec<Fragment>,
}

impl PipelineError {
    /// Compose an error from template keys and parameters.
    ///
    /// Each fragment keeps only the parameters its template declares.
    ///
    /// # Panics
    ///
    /// Panics if a template's parameter is not supplied, or if `keys` does not
    /// contain at least one event and one explanation. Both are programming
    /// errors, not data errors.
    pub fn compose(keys: &[FragmentKey], params: &Params) -> Self {
        let fragments: Vec<Fragment> = keys
            .iter()
            .map(|&key| Fragment::resolve(key, params))
            .collect();

        assert!(
            fragments.iter().any(|f| f.kind() == FragmentKind::Event),
            "pipeline error needs at least one event"
        );
        assert!(
            fragments
                .iter()
                .any(|f| f.kind() == FragmentKind::Explanation),
            "pipeline error needs at least one explanation"
        );

        Self { fragments }
    }

    /// Merge several errors into one, dropping duplicate fragments.
    ///
    /// Returns `None` when `errors` is empty.
    pub fn merge(errors: impl IntoIterator<Item = PipelineError>) -> Option<Self> {
        let mut fragments: Vec<Fragment> = Vec::new();
        for error in errors {
            for fragment in error.fragments {
                if !fragments.contains(&fragment) {
                    fragments.push(fragment);
                }
            }
        }
        if fragments.is_empty() {
            None
        } else {
            Some(Self { fragments })
        }
    }

    /// All fragments in composition order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Event keys in order.
    pub fn events(&self) -> impl Iterator<Item = EventKey> + '_ {
        self.fragments.iter().filter_map(|f| match f.key {
            FragmentKey::Event(key) => Some(key),
            _ => None,
        })
    }

    /// Explanation keys in order.
    pub fn explanations(&self) -> impl Iterator<Item = ExplanationKey> + '_ {
        self.fragments.iter().filter_map(|f| match f.key {
            FragmentKey::Explanation(key) => Some(key),
            _ => None,
        })
    }

    /// Remediation keys in order.
    pub fn remediations(&self) -> impl Iterator<Item = RemediationKey> + '_ {
        self.fragments.iter().filter_map(|f| match f.key {
            FragmentKey::Remediation(key) => Some(key),
            _ => None,
        })
    }

    /// Check whether an event occurred.
    pub fn has_event(&self, key: EventKey) -> bool {
        self.events().any(|k| k == key)
    }

    /// Check whether an explanation occurred.
    pub fn has_explanation(&self, key: ExplanationKey) -> bool {
        self.explanations().any(|k| k == key)
    }

    /// Check whether a remediation is suggested.
    pub fn has_remediation(&self, key: RemediationKey) -> bool {
        self.remediations().any(|k| k == key)
    }

    /// First value of a parameter across all fragments.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.fragments.iter().find_map(|f| f.param(name))
    }

    fn of_kind(&self, kind: FragmentKind) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(move |f| f.kind() == kind)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in self.of_kind(FragmentKind::Event) {
            writeln!(f, "🚧 {}", event.message())?;
        }
        for explanation in self.of_kind(FragmentKind::Explanation) {
            writeln!(f)?;
            writeln!(f, "{}", explanation.message())?;
        }
        let mut remediations = self.of_kind(FragmentKind::Remediation).peekable();
        if remediations.peek().is_some() {
            writeln!(f)?;
        }
        for remediation in remediations {
            writeln!(f, "🛠️ {}", remediation.message())?;
            if let Some(action) = remediation.action() {
                writeln!(f, "   {}: {}", action.text, action.href)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for PipelineError {}
