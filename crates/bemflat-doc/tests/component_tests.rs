//! Tests for reading, merging and writing topdoc records.

use bemflat_doc::{DocComponent, DocError};
use pretty_assertions::assert_eq;

fn parse(text: &str) -> DocComponent {
    DocComponent::from_comment(text)
        .expect("comment should parse")
        .expect("comment should be a topdoc comment")
}

#[test]
fn test_known_fields() {
    let doc = parse("topdoc\nname: Button\ndescription: a simple button\nmarkup: |\n  <button/>\n");
    assert_eq!(doc.name.as_deref(), Some("Button"));
    assert_eq!(doc.description.as_deref(), Some("a simple button"));
    assert_eq!(doc.markup.as_deref(), Some("<button/>\n"));
    assert!(doc.extra.is_empty());
}

#[test]
fn test_indented_body() {
    // Comments nested inside a block keep their indentation.
    let doc = parse("topdoc\n  name: Secondary Button\n  description: a secondary button");
    assert_eq!(doc.name.as_deref(), Some("Secondary Button"));
    assert_eq!(doc.description.as_deref(), Some("a secondary button"));
}

#[test]
fn test_extra_fields_keep_order() {
    let doc = parse("topdoc\nname: Button\ntags:\n  - desktop\n  - light\nblarg: true");
    let keys: Vec<&str> = doc.extra.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["tags", "blarg"]);
}

#[test]
fn test_body_must_be_mapping() {
    let err = DocComponent::from_comment("topdoc\n- just\n- a list").unwrap_err();
    assert!(matches!(err, DocError::Yaml(_)));
}

#[test]
fn test_serialize_starts_with_marker() {
    let doc = parse("topdoc\nname: Button\ndescription: a simple button");
    assert_eq!(
        doc.serialize().unwrap(),
        "topdoc\nname: Button\ndescription: a simple button"
    );
}

#[test]
fn test_serialize_reads_back() {
    let mut doc = parse("topdoc\nname: Button\nmarkup: |\n  <button/>\nblarg: 3");
    doc.markup = Some("<button class=\"Button\"/>\n<button class=\"Button is-disabled\"/>\n".to_string());

    let text = doc.serialize().unwrap();
    assert!(text.starts_with("topdoc\n"));
    assert!(!text.ends_with('\n'));

    let back = parse(&text);
    assert_eq!(back, doc);
}

#[test]
fn test_merge_overrides_field_by_field() {
    let mut block = parse("topdoc\nname: Button\ndescription: a simple button\nmarkup: <b/>\nkind: basic");
    let modifier = parse("topdoc\nname: Secondary Button\ndescription: a secondary button\nkind: secondary\nextra: 1");

    block.merge(&modifier);

    assert_eq!(block.name.as_deref(), Some("Secondary Button"));
    assert_eq!(block.description.as_deref(), Some("a secondary button"));
    assert_eq!(block.markup.as_deref(), Some("<b/>"));
    let keys: Vec<&str> = block.extra.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["kind", "extra"]);
    assert_eq!(block.extra["kind"], serde_yaml::Value::from("secondary"));
}
