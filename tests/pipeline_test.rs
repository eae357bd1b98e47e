//! Integration tests for the content transformation pipeline.

use pagesource::blocks::BlockRegistry;
use pagesource::model::{DocumentTree, Node, Person, RawBlock, RawRecord, TypedRecord};
use pagesource::pipeline::{aggregate, map_blocks, map_record, FieldMode};
use pagesource::report::{EventKey, ExplanationKey, Params, PipelineError, RemediationKey};
use pagesource::schema::shorthand::{checkbox, date, people, select, status, text, title, url};
use pagesource::schema::RuleSet;
use pagesource::{ContentSource, FetchOptions, FieldValue, FixtureSource, Outcome};
use serde_json::{json, Value};

fn runs(text: &str) -> Value {
    json!([{
        "type": "text",
        "text": { "content": text, "link": null },
        "annotations": { "bold": false, "italic": false, "code": false },
        "plain_text": text,
        "href": null
    }])
}

fn paragraph(text: &str) -> RawBlock {
    RawBlock::new("paragraph", json!({ "rich_text": runs(text) }))
}

fn full_record(id: &str) -> RawRecord {
    RawRecord::new(id)
        .with_field("Page", json!({ "id": "title", "type": "title", "title": runs("Hello") }))
        .with_field("Slug", json!({ "id": "s", "type": "rich_text", "rich_text": runs("hello") }))
        .with_field("Image", json!({ "id": "i", "type": "url", "url": "https://example.com/c.png" }))
        .with_field("Featured", json!({ "id": "f", "type": "checkbox", "checkbox": true }))
        .with_field(
            "Published",
            json!({ "id": "d", "type": "date", "date": { "start": "2024-01-02", "end": null, "time_zone": null } }),
        )
        .with_field(
            "Category",
            json!({ "id": "c", "type": "select", "select": { "id": "x", "name": "Rust", "color": "red" } }),
        )
        .with_field(
            "State",
            json!({ "id": "st", "type": "status", "status": { "id": "y", "name": "Done", "color": "green" } }),
        )
        .with_field(
            "Authors",
            json!({ "id": "a", "type": "people", "people": [{ "object": "user", "id": "u1", "name": "Ada" }] }),
        )
}

fn full_rules() -> RuleSet {
    RuleSet::new()
        .field("title", title("Page"))
        .field("slug", text("Slug"))
        .field("cover", url("Image"))
        .field("featured", checkbox("Featured"))
        .field("published", date("Published"))
        .field("category", select("Category"))
        .field("state", status("State"))
        .field("authors", people("Authors"))
}

fn failure(record_id: &str) -> PipelineError {
    PipelineError::compose(
        &[
            EventKey::FetchRecordsFailed.into(),
            ExplanationKey::MissingField.into(),
        ],
        &Params::new()
            .with("field_kind", "title")
            .with("field_name", "Page")
            .with("record_id", record_id),
    )
}

// ==================== Record Field Mapper ====================

#[test]
fn test_valid_record_has_exactly_declared_fields() {
    let raw = full_record("rec-1");
    let record = map_record(&raw.id, &full_rules(), &raw.fields, FieldMode::FirstFailure).unwrap();

    assert_eq!(record.id, "rec-1");
    let names: Vec<&str> = record.fields.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["title", "slug", "cover", "featured", "published", "category", "state", "authors"]
    );
    assert_eq!(record.get_str("title"), Some("Hello"));
    assert_eq!(record.get_str("published"), Some("2024-01-02"));
    assert_eq!(record.get_str("category"), Some("Rust"));
    assert_eq!(record.get_str("state"), Some("Done"));
    assert_eq!(record.get_bool("featured"), Some(true));
    assert_eq!(record.get_people("authors").unwrap()[0].display_name(), "Ada");

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 9);
}

#[test]
fn test_absent_field_with_fallback_never_fails() {
    let rules = RuleSet::new()
        .field("cover", url("Image").with_fallback("https://example.com/default.png").unwrap())
        .field("published", date("Published").with_fallback("1970-01-01").unwrap())
        .field("authors", people("Authors").with_fallback(Vec::<Person>::new()).unwrap());

    let absent = RawRecord::new("rec-2")
        .with_field("Image", json!({ "type": "url", "url": null }))
        .with_field("Published", json!({ "type": "date", "date": null }))
        .with_field("Authors", json!({ "type": "people", "people": [] }));

    for mode in [FieldMode::FirstFailure, FieldMode::CollectAll] {
        let record = map_record(&absent.id, &rules, &absent.fields, mode).unwrap();
        assert_eq!(record.get_str("cover"), Some("https://example.com/default.png"));
        assert_eq!(record.get_str("published"), Some("1970-01-01"));
        assert_eq!(record.get("authors"), Some(&FieldValue::People(vec![])));
    }
}

#[test]
fn test_absent_field_without_fallback_cites_field_and_record() {
    let raw = RawRecord::new("rec-3")
        .with_field("Slug", json!({ "type": "rich_text", "rich_text": [] }));
    let rules = RuleSet::new().field("slug", text("Slug"));

    let err = map_record(&raw.id, &rules, &raw.fields, FieldMode::FirstFailure).unwrap_err();
    assert!(err.has_explanation(ExplanationKey::MissingField));
    assert_eq!(err.param("field_name"), Some("Slug"));
    assert_eq!(err.param("record_id"), Some("rec-3"));

    let message = err.to_string();
    assert!(message.contains("`Slug`"));
    assert!(message.contains("`rec-3`"));
}

// ==================== Block-to-Document Mapper ====================

#[test]
fn test_covered_blocks_keep_order_and_count() {
    let blocks = vec![
        RawBlock::new("heading_2", json!({ "rich_text": runs("Intro") })),
        paragraph("one"),
        RawBlock::new("bulleted_list_item", json!({ "rich_text": runs("a") })),
        RawBlock::new("numbered_list_item", json!({ "rich_text": runs("b") })),
        RawBlock::new("quote", json!({ "rich_text": runs("q") })),
        RawBlock::new("code", json!({ "language": "rust", "caption": [], "rich_text": runs("x") })),
        paragraph("two"),
    ];

    let tree = map_blocks("page", &blocks, &BlockRegistry::with_defaults(), false).unwrap();
    assert_eq!(tree.len(), blocks.len());
    assert_eq!(tree.children[0], Node::heading(2, "Intro"));
    assert_eq!(tree.children[1], Node::paragraph("one"));
    assert_eq!(tree.children[6], Node::paragraph("two"));
}

#[test]
fn test_unregistered_block_policy() {
    let blocks = vec![
        paragraph("before"),
        RawBlock::new("table", json!({ "table_width": 3 })),
        paragraph("after"),
    ];
    let registry = BlockRegistry::with_defaults();

    let err = map_blocks("page", &blocks, &registry, false).unwrap_err();
    assert!(err.has_event(EventKey::FetchPageContentFailed));
    assert!(err.has_explanation(ExplanationKey::UnsupportedBlockType));
    assert!(err.has_remediation(RemediationKey::AllowUnknownBlocks));

    let tree = map_blocks("page", &blocks, &registry, true).unwrap();
    assert_eq!(
        tree.children,
        vec![Node::paragraph("before"), Node::paragraph("after")]
    );
}

// ==================== Collection Aggregator ====================

#[test]
fn test_aggregate_without_failures_keeps_order() {
    let outcomes: Vec<Outcome<TypedRecord>> = ["a", "b", "c"]
        .iter()
        .map(|id| Ok(TypedRecord::new(*id)))
        .collect();

    for skip_failing in [false, true] {
        let records = aggregate(outcomes.clone(), skip_failing).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}

#[test]
fn test_aggregate_fail_fast_returns_error_at_position() {
    let outcomes: Vec<Outcome<TypedRecord>> = vec![
        Ok(TypedRecord::new("a")),
        Err(failure("b")),
        Ok(TypedRecord::new("c")),
        Err(failure("d")),
    ];

    assert_eq!(aggregate(outcomes, false), Err(failure("b")));
}

#[test]
fn test_aggregate_skip_policy_drops_failures() {
    let outcomes: Vec<Outcome<TypedRecord>> = vec![
        Err(failure("a")),
        Ok(TypedRecord::new("b")),
        Err(failure("c")),
        Ok(TypedRecord::new("d")),
        Ok(TypedRecord::new("e")),
    ];

    let records = aggregate(outcomes, true).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "d", "e"]);
}

// ==================== End to end ====================

#[test]
fn test_missing_title_fails_fetch_records() {
    let record = RawRecord::new("rec-42")
        .with_field("Page", json!({ "type": "title", "title": [] }))
        .with_field("Slug", json!({ "type": "rich_text", "rich_text": runs("hello") }));
    let source = FixtureSource::new().with_collection("posts", vec![record]);
    let rules = RuleSet::new()
        .field("title", title("Page"))
        .field("slug", text("Slug"));

    let err = ContentSource::new(source, "posts", rules)
        .fetch_records(&FetchOptions::new().with_skip_failing(false))
        .unwrap_err();

    assert!(err.has_event(EventKey::FetchRecordsFailed));
    assert!(err.has_explanation(ExplanationKey::MissingField));
    assert_eq!(err.param("field_name"), Some("Page"));
    assert_eq!(err.param("record_id"), Some("rec-42"));
}

#[test]
fn test_page_with_unknown_block_drops_it() {
    let source = FixtureSource::new().with_page(
        "page-1",
        vec![
            paragraph("hi"),
            RawBlock::new("synced_block", json!({ "synced_from": null })),
            RawBlock::new(
                "image",
                json!({ "caption": [], "type": "external", "external": { "url": "x" } }),
            ),
        ],
    );
    let content = ContentSource::new(source, "posts", RuleSet::new());

    let tree = content
        .fetch_page_content(
            "page-1",
            &pagesource::ContentOptions::new().with_allow_unknown_block_types(true),
        )
        .unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(
        tree,
        DocumentTree::from_children(vec![Node::paragraph("hi"), Node::image("x")])
    );
}

#[test]
fn test_skip_failing_with_content_expansion() {
    let mut broken = full_record("rec-2");
    broken.fields.remove("Page");
    let source = FixtureSource::new()
        .with_collection("posts", vec![full_record("rec-1"), broken, full_record("rec-3")])
        .with_page("rec-1", vec![paragraph("first")])
        .with_page("rec-3", vec![paragraph("third")]);

    let records = ContentSource::new(source, "posts", full_rules())
        .fetch_records(
            &FetchOptions::new()
                .with_content(true)
                .with_skip_failing(true)
                .with_max_concurrency(2),
        )
        .unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["rec-1", "rec-3"]);
    assert_eq!(records[1].content.as_ref().unwrap().plain_text(), "third");
}

#[test]
fn test_content_failure_aborts_by_default() {
    let source = FixtureSource::new()
        .with_collection("posts", vec![full_record("rec-1"), full_record("rec-2")])
        .with_page("rec-1", vec![paragraph("first")]);
    let content = ContentSource::new(source, "posts", full_rules());

    let err = content
        .fetch_records(&FetchOptions::new().with_content(true).with_skip_failing(true))
        .unwrap_err();
    assert!(err.has_explanation(ExplanationKey::BlockListFailed));
    assert_eq!(err.param("page_id"), Some("rec-2"));

    let records = content
        .fetch_records(
            &FetchOptions::new()
                .with_content(true)
                .with_skip_failing(true)
                .with_abort_on_content_failure(false),
        )
        .unwrap();
    assert_eq!(records.len(), 1);
}
