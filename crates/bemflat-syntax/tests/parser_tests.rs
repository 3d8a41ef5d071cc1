//! Integration tests for the stylesheet parser and printer.

use bemflat_syntax::{NodeKind, SyntaxError, parse_stylesheet};
use pretty_assertions::assert_eq;

/// Parse then print, asserting the text survives unchanged.
fn round_trip(input: &str) {
    let sheet = parse_stylesheet(input).unwrap();
    assert_eq!(sheet.to_string(), input);
}

#[test]
fn test_round_trip_component() {
    round_trip(
        "/* topdoc\nname: Button\n*/\n@block Button {\n  color: #333;\n  @state :disabled {\n    opacity: 0.1;\n  }\n}\n",
    );
}

#[test]
fn test_round_trip_plain_rules() {
    round_trip(".a{color:red}\n\n.b , .c {\n\tmargin : 0 auto !important;\n}");
}

#[test]
fn test_round_trip_bodiless_at_rule() {
    round_trip("@import url(\"a;b.css\");\n@charset \"utf-8\";");
}

#[test]
fn test_round_trip_nested_rule_in_block() {
    round_trip("@block Menu {\n  color: red;\n  & > li { display: block; }\n}");
}

#[test]
fn test_round_trip_comment_after_last_declaration() {
    round_trip(".a {\n  color: red;\n  /* note */\n}");
}

#[test]
fn test_at_rule_fields() {
    let sheet = parse_stylesheet("@modifier secondary {\n  color: #666;\n}").unwrap();
    let node = sheet.first_child(sheet.root()).unwrap();
    let at_rule = sheet.as_at_rule(node).unwrap();
    assert_eq!(at_rule.name, "modifier");
    assert_eq!(at_rule.params, "secondary");
    assert!(at_rule.has_body);
    let raws = sheet.raws(node).unwrap();
    assert_eq!(raws.after_name, " ");
    assert_eq!(raws.between, " ");
    assert_eq!(raws.after, "\n");
    assert!(raws.semicolon);
}

#[test]
fn test_comment_fields_and_source() {
    let input = "a { }\n/* topdoc\nname: x\n*/";
    let sheet = parse_stylesheet(input).unwrap();
    let comment = sheet.last_child(sheet.root()).unwrap();
    assert_eq!(sheet.as_comment(comment).unwrap().text, "topdoc\nname: x");
    let raws = sheet.raws(comment).unwrap();
    assert_eq!(raws.before, "\n");
    assert_eq!(raws.left, " ");
    assert_eq!(raws.right, "\n");
    let span = sheet.get(comment).unwrap().source.unwrap();
    assert_eq!(span.end, input.len());
    assert_eq!(&input[span.start..span.start + 2], "/*");
}

#[test]
fn test_declaration_value_keeps_important() {
    let sheet = parse_stylesheet("a { color: red !important; }").unwrap();
    let rule = sheet.first_child(sheet.root()).unwrap();
    let decl = sheet.first_child(rule).unwrap();
    assert_eq!(sheet.as_declaration(decl).unwrap().value, "red !important");
}

#[test]
fn test_rule_node_kinds() {
    let sheet = parse_stylesheet("a { b { c: d; } /* x */ }").unwrap();
    let a = sheet.first_child(sheet.root()).unwrap();
    let children = sheet.children(a);
    assert_eq!(children.len(), 2);
    assert!(matches!(sheet.kind(children[0]), Some(NodeKind::Rule(_))));
    assert!(matches!(sheet.kind(children[1]), Some(NodeKind::Comment(_))));
}

#[test]
fn test_unclosed_block() {
    let err = parse_stylesheet("@block Button {\n  color: red;").unwrap_err();
    assert_eq!(err, SyntaxError::UnclosedBlock { line: 1, column: 15 });
}

#[test]
fn test_unexpected_close_brace() {
    let err = parse_stylesheet("a {}\n}").unwrap_err();
    assert_eq!(err, SyntaxError::UnexpectedCloseBrace { line: 2, column: 1 });
}

#[test]
fn test_unknown_word() {
    let err = parse_stylesheet("a { color red; }").unwrap_err();
    assert!(matches!(err, SyntaxError::UnknownWord { ref word, .. } if word == "color red"));
}

#[test]
fn test_unclosed_comment() {
    let err = parse_stylesheet("a {}\n/* open").unwrap_err();
    assert!(matches!(err, SyntaxError::UnclosedComment { line: 2, .. }));
}
