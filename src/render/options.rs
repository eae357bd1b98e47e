//! Rendering options and configuration.

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Include YAML frontmatter with the record's fields
    pub include_frontmatter: bool,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Alternative text for images without a caption
    pub image_alt_fallback: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable escaping of special characters.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the alternative text used for images without a caption.
    pub fn with_image_alt_fallback(mut self, alt: impl Into<String>) -> Self {
        self.image_alt_fallback = Some(alt.into());
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_frontmatter: false,
            list_marker: '-',
            escape_special_chars: true,
            image_alt_fallback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(9)
            .with_list_marker('*')
            .with_escaping(false)
            .with_image_alt_fallback("image");

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 6);
        assert_eq!(options.list_marker, '*');
        assert!(!options.escape_special_chars);
        assert_eq!(options.image_alt_fallback.as_deref(), Some("image"));
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert!(!options.include_frontmatter);
        assert!(options.escape_special_chars);
        assert_eq!(options.list_marker, '-');
    }
}
