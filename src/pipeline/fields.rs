//! Record field mapping.

use super::FieldMode;
use crate::model::TypedRecord;
use crate::report::PipelineError;
use crate::schema::RuleSet;
use crate::Outcome;
use serde_json::{Map, Value};

/// Apply a rule set to the raw fields of one record.
///
/// Fields of the result follow the rule set order. In
/// [`FieldMode::FirstFailure`] the first failing rule decides the error; in
/// [`FieldMode::CollectAll`] every rule runs and all failures are merged.
pub fn map_record(
    id: &str,
    rules: &RuleSet,
    raw_fields: &Map<String, Value>,
    mode: FieldMode,
) -> Outcome<TypedRecord> {
    let mut record = TypedRecord::new(id);
    let mut failures = Vec::new();

    for (name, rule) in rules.iter() {
        match rule.apply(id, raw_fields) {
            Ok(value) => {
                record.fields.insert(name.to_string(), value);
            }
            Err(error) => match mode {
                FieldMode::FirstFailure => return Err(error),
                FieldMode::CollectAll => failures.push(error),
            },
        }
    }

    match PipelineError::merge(failures) {
        Some(error) => Err(error),
        None => Ok(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use crate::report::{EventKey, ExplanationKey};
    use crate::schema::shorthand::{checkbox, text, title, url};
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .field("title", title("Page"))
            .field("slug", text("Slug"))
            .field("cover", url("Image"))
            .field("featured", checkbox("Featured"))
    }

    #[test]
    fn test_map_record_in_rule_order() {
        let fields = raw(json!({
            "Featured": { "type": "checkbox", "checkbox": true },
            "Image": { "type": "url", "url": "https://example.com/c.png" },
            "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "hello" }] },
            "Page": { "type": "title", "title": [{ "plain_text": "Hello" }] },
            "Ignored": { "type": "url", "url": null }
        }));

        let record = map_record("p1", &rules(), &fields, FieldMode::FirstFailure).unwrap();
        assert_eq!(record.id, "p1");
        let names: Vec<&str> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["title", "slug", "cover", "featured"]);
        assert_eq!(record.get("featured"), Some(&FieldValue::Bool(true)));
        assert!(record.content.is_none());
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let fields = raw(json!({
            "Featured": { "type": "checkbox", "checkbox": false }
        }));

        let err = map_record("p1", &rules(), &fields, FieldMode::FirstFailure).unwrap_err();
        assert_eq!(err.explanations().count(), 1);
        assert_eq!(err.param("field_name"), Some("Page"));
    }

    #[test]
    fn test_collect_all_reports_every_field() {
        let fields = raw(json!({
            "Featured": { "type": "checkbox", "checkbox": "no" }
        }));

        let err = map_record("p1", &rules(), &fields, FieldMode::CollectAll).unwrap_err();
        assert_eq!(err.events().count(), 1);
        assert!(err.has_event(EventKey::FetchRecordsFailed));
        assert_eq!(
            err.explanations().collect::<Vec<_>>(),
            vec![
                ExplanationKey::MissingField,
                ExplanationKey::MissingField,
                ExplanationKey::MissingField,
                ExplanationKey::MalformedField,
            ]
        );
    }

    #[test]
    fn test_modes_agree_on_success() {
        let rules = RuleSet::new().field("featured", checkbox("Featured"));
        let fields = raw(json!({ "Featured": { "type": "checkbox", "checkbox": true } }));
        assert_eq!(
            map_record("p1", &rules, &fields, FieldMode::FirstFailure),
            map_record("p1", &rules, &fields, FieldMode::CollectAll)
        );
    }
}
