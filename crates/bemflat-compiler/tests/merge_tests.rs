//! Tests for declaration merging and the state rule registry.

use bemflat_compiler::{StateRegistry, merge_declarations};
use bemflat_syntax::{NodeId, Stylesheet, parse_stylesheet};
use pretty_assertions::assert_eq;

/// Parse `source` and return the sheet with its top-level nodes.
fn parse(source: &str) -> (Stylesheet, Vec<NodeId>) {
    let sheet = parse_stylesheet(source).unwrap();
    let top = sheet.children(sheet.root()).to_vec();
    (sheet, top)
}

#[test]
fn test_overwrite_keeps_position() {
    let (mut sheet, top) = parse(".t {\n  color: red;\n  width: 1px;\n}\n.s {\n  color: blue;\n}");
    let (target, source) = (top[0], top[1]);
    let incoming = sheet.children(source).to_vec();

    merge_declarations(&mut sheet, target, &incoming);
    sheet.remove(source);

    assert_eq!(sheet.to_string(), ".t {\n  color: blue;\n  width: 1px;\n}");
}

#[test]
fn test_new_properties_append_in_order() {
    let (mut sheet, top) = parse(".t {\n  color: red;\n}\n.s {\n  b: 2;\n  /* c */\n  a: 1;\n}");
    let (target, source) = (top[0], top[1]);
    let incoming = sheet.children(source).to_vec();

    merge_declarations(&mut sheet, target, &incoming);
    sheet.remove(source);

    assert_eq!(
        sheet.to_string(),
        ".t {\n  color: red;\n  b: 2;\n  /* c */\n  a: 1;\n}"
    );
}

#[test]
fn test_last_batch_wins() {
    let (mut sheet, top) = parse(".t { color: a; }\n.x { color: b; }\n.y { color: c; }");
    for &source in &top[1..] {
        let incoming = sheet.children(source).to_vec();
        merge_declarations(&mut sheet, top[0], &incoming);
    }
    let declaration = sheet.first_child(top[0]).unwrap();
    assert_eq!(sheet.as_declaration(declaration).unwrap().value, "c");
    assert_eq!(sheet.children(top[0]).len(), 1);
}

#[test]
fn test_registry_merges_same_selector() {
    let (mut sheet, top) = parse(
        "@state :disabled {\n  opacity: 0.1;\n}\n@state :hover {\n  color: red;\n}\n@state :disabled {\n  outline: none;\n}",
    );
    let mut registry = StateRegistry::new();
    for (&node, selector) in top.iter().zip([".a:disabled", ".a:hover", ".a:disabled"]) {
        sheet.remove(node);
        registry.resolve_state(&mut sheet, selector.to_string(), node, ":disabled");
    }

    let selectors: Vec<&str> = registry.iter().map(|(selector, _)| selector).collect();
    assert_eq!(selectors, vec![".a:disabled", ".a:hover"]);

    let disabled = registry.get(".a:disabled").unwrap();
    let props: Vec<&str> = sheet
        .children(disabled)
        .iter()
        .filter_map(|&id| sheet.as_declaration(id))
        .map(|declaration| declaration.prop.as_str())
        .collect();
    assert_eq!(props, vec!["opacity", "outline"]);
}
