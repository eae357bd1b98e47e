//! Fetch options and configuration.

/// Options for fetching records from a collection.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Whether to fetch and map each record's page content
    pub expand_content: bool,

    /// Drop failing records instead of failing the batch
    pub skip_failing: bool,

    /// Drop unsupported or malformed blocks instead of failing the page
    pub allow_unknown_block_types: bool,

    /// Fail the batch on the first content failure, even when skipping
    pub abort_on_content_failure: bool,

    /// How field failures of a single record are reported
    pub field_mode: FieldMode,

    /// Maximum number of concurrent content fetches (0 or 1 = sequential)
    pub max_concurrency: usize,
}

impl FetchOptions {
    /// Create new fetch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable content expansion.
    pub fn with_content(mut self, expand: bool) -> Self {
        self.expand_content = expand;
        self
    }

    /// Enable or disable skipping of failing records.
    pub fn with_skip_failing(mut self, skip: bool) -> Self {
        self.skip_failing = skip;
        self
    }

    /// Enable or disable dropping of unknown blocks.
    pub fn with_allow_unknown_block_types(mut self, allow: bool) -> Self {
        self.allow_unknown_block_types = allow;
        self
    }

    /// Set whether a content failure aborts the batch.
    pub fn with_abort_on_content_failure(mut self, abort: bool) -> Self {
        self.abort_on_content_failure = abort;
        self
    }

    /// Set field failure mode.
    pub fn with_field_mode(mut self, mode: FieldMode) -> Self {
        self.field_mode = mode;
        self
    }

    /// Report every failing field of a record.
    pub fn collect_all(mut self) -> Self {
        self.field_mode = FieldMode::CollectAll;
        self
    }

    /// Set the maximum number of concurrent content fetches.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    /// Options used for each page when expanding content.
    pub fn content_options(&self) -> ContentOptions {
        ContentOptions::new().with_allow_unknown_block_types(self.allow_unknown_block_types)
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            expand_content: false,
            skip_failing: false,
            allow_unknown_block_types: true,
            abort_on_content_failure: true,
            field_mode: FieldMode::FirstFailure,
            max_concurrency: 1,
        }
    }
}

/// Options for fetching the content of a single page.
#[derive(Debug, Clone)]
pub struct ContentOptions {
    /// Drop unsupported or malformed blocks instead of failing the page
    pub allow_unknown_block_types: bool,
}

impl ContentOptions {
    /// Create new content options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable dropping of unknown blocks.
    pub fn with_allow_unknown_block_types(mut self, allow: bool) -> Self {
        self.allow_unknown_block_types = allow;
        self
    }

    /// Fail on any unsupported block.
    pub fn strict(mut self) -> Self {
        self.allow_unknown_block_types = false;
        self
    }
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            allow_unknown_block_types: true,
        }
    }
}

/// How field failures of a single record are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMode {
    /// Stop at the first failing field
    #[default]
    FirstFailure,
    /// Apply every rule and report all failing fields together
    CollectAll,
}
