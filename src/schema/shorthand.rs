//! Rule builders, one per field kind.
//!
//! ```
//! use pagesource::schema::shorthand::{checkbox, people, title};
//!
//! let rule = checkbox("Published").with_fallback(false)?;
//! assert!(rule.fallback().is_some());
//! assert_eq!(title("Page").source(), "Page");
//! assert!(people("Authors").fallback().is_none());
//! # Ok::<(), pagesource::Error>(())
//! ```

use super::{FieldRule, PropertyKind};

/// Rich text field; yields the first run's plain text.
pub fn text(source: impl Into<String>) -> FieldRule {
    FieldRule::new(source, PropertyKind::RichText)
}

/// Title field; yields the first run's plain text.
pub fn title(source: impl Into<String>) -> FieldRule {
    FieldRule::new(source, PropertyKind::Title)
}

/// URL field.
pub fn url(source: impl Into<String>) -> FieldRule {
    FieldRule::new(source, PropertyKind::Url)
}

/// Checkbox field.
pub fn checkbox(source: impl Into<String>) -> FieldRule {
    FieldRule::new(source, PropertyKind::Checkbox)
}

/// Date field; yields the start date.
pub fn date(source: impl Into<String>) -> FieldRule {
    FieldRule::new(source, PropertyKind::Date)
}

/// Select field; yields the option name.
pub fn select(source: impl Into<String>) -> FieldRule {
    FieldRule::new(source, PropertyKind::Select)
}

/// Status field; yields the option name.
pub fn status(source: impl Into<String>) -> FieldRule {
    FieldRule::new(source, PropertyKind::Status)
}

/// People field; yields the referenced users.
pub fn people(source: impl Into<String>) -> FieldRule {
    FieldRule::new(source, PropertyKind::People)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_kinds() {
        assert_eq!(text("a").kind(), PropertyKind::RichText);
        assert_eq!(title("a").kind(), PropertyKind::Title);
        assert_eq!(url("a").kind(), PropertyKind::Url);
        assert_eq!(checkbox("a").kind(), PropertyKind::Checkbox);
        assert_eq!(date("a").kind(), PropertyKind::Date);
        assert_eq!(select("a").kind(), PropertyKind::Select);
        assert_eq!(status("a").kind(), PropertyKind::Status);
        assert_eq!(people("a").kind(), PropertyKind::People);
    }
}
