//! Tests for keeping topdoc comments in sync with compiled class names.

use bemflat_compiler::{
    CompileOptions, NameParts, NamingError, compile_css, compile_stylesheet, parse_state,
};
use bemflat_doc::DocComponent;
use bemflat_syntax::parse_stylesheet;
use pretty_assertions::assert_eq;

const SIMPLE: &str = include_str!("fixtures/topdoc-simple.css");
const MULTIPLE: &str = include_str!("fixtures/topdoc-multiple-modifiers.css");
const TOO_MANY: &str = include_str!("fixtures/topdoc-toomany-modifiers.css");

/// Split compiled output into its leading topdoc record and the CSS after
/// the comment.
fn split_output(css: &str) -> (DocComponent, &str) {
    let start = css.find("/*").expect("output should start with a comment") + 2;
    let end = css.find("*/").expect("comment should be closed");
    let doc = DocComponent::from_comment(css[start..end].trim())
        .expect("comment should parse")
        .expect("comment should be a topdoc comment");
    (doc, &css[end + 2..])
}

fn markup_classes(doc: &DocComponent) -> Vec<String> {
    let markup = doc.markup.as_deref().expect("markup should be set");
    markup
        .lines()
        .filter_map(|line| {
            let start = line.find("class=\"")? + "class=\"".len();
            let end = start + line[start..].find('"')?;
            Some(line[start..end].to_string())
        })
        .collect()
}

#[test]
fn test_simple_topdoc() {
    let output = compile_css(SIMPLE, &CompileOptions::new()).unwrap();
    let (doc, css) = split_output(&output.css);

    assert_eq!(doc.name.as_deref(), Some("Button"));
    assert_eq!(doc.description.as_deref(), Some("a simple button"));
    assert_eq!(markup_classes(&doc), vec!["Button", "Button is-disabled"]);
    assert_eq!(
        css,
        "\n.Button {\n  color: #333;\n}\n.Button:disabled, .Button.is-disabled {\n  opacity: 0.1;\n}\n"
    );
}

#[test]
fn test_modifier_topdoc() {
    let options = CompileOptions::new().with_modifier("secondary");
    let output = compile_css(SIMPLE, &options).unwrap();
    let (doc, css) = split_output(&output.css);

    assert_eq!(doc.name.as_deref(), Some("Secondary Button"));
    assert_eq!(doc.description.as_deref(), Some("a secondary button"));
    assert_eq!(
        markup_classes(&doc),
        vec!["Button--secondary", "Button--secondary is-disabled"]
    );
    assert_eq!(
        css,
        "\n.Button--secondary {\n  color: #666;\n}\n.Button--secondary:disabled, .Button--secondary.is-disabled {\n  opacity: 0.1;\n}\n"
    );
}

#[test]
fn test_comment_keeps_its_delimiters() {
    let output = compile_css(SIMPLE, &CompileOptions::new()).unwrap();
    assert!(output.css.starts_with("/* topdoc\nname: Button\n"));
    assert_eq!(output.css.matches("/*").count(), 1);
    assert!(!output.css.contains("{{"));
}

#[test]
fn test_collect_modifiers() {
    let mut sheet = parse_stylesheet(MULTIPLE).unwrap();
    let report = compile_stylesheet(&mut sheet, &CompileOptions::new());
    assert_eq!(report.modifiers, vec!["secondary", "cta"]);
}

#[test]
fn test_second_modifier_topdoc() {
    let output = compile_css(MULTIPLE, &CompileOptions::new().with_modifier("cta")).unwrap();
    let (doc, css) = split_output(&output.css);

    assert_eq!(doc.name.as_deref(), Some("CTA Button"));
    assert_eq!(doc.description.as_deref(), Some("a call to action button"));
    assert_eq!(markup_classes(&doc), vec!["Button--cta", "Button--cta is-disabled"]);
    assert_eq!(
        css,
        "\n.Button--cta {\n  color: white;\n  background: green;\n}\n.Button--cta:disabled, .Button--cta.is-disabled {\n  opacity: 0.1;\n}\n"
    );
}

#[test]
fn test_first_modifier_topdoc_with_more_modifiers_present() {
    let simple = compile_css(SIMPLE, &CompileOptions::new().with_modifier("secondary")).unwrap();
    let multiple =
        compile_css(MULTIPLE, &CompileOptions::new().with_modifier("secondary")).unwrap();
    assert_eq!(multiple.css, simple.css);
}

#[test]
fn test_three_modifiers() {
    let options = CompileOptions::new().with_modifiers(["secondary", "large", "dark"]);
    let output = compile_css(TOO_MANY, &options).unwrap();
    let (doc, css) = split_output(&output.css);

    assert_eq!(doc.name.as_deref(), Some("Secondary Button"));
    assert_eq!(
        markup_classes(&doc),
        vec![
            "Button--secondary--large--dark",
            "Button--secondary--large--dark is-disabled"
        ]
    );
    assert_eq!(
        css.trim(),
        ".Button--secondary--large--dark {
  color: black;
  width: 200px;
}
.Button--secondary--large--dark:disabled, .Button--secondary--large--dark.is-disabled {
  opacity: 0.1;
}"
    );
}

#[test]
fn test_three_modifiers_in_different_order() {
    let options = CompileOptions::new().with_modifiers(["large", "dark", "secondary"]);
    let output = compile_css(TOO_MANY, &options).unwrap();
    let (doc, css) = split_output(&output.css);

    assert_eq!(doc.name.as_deref(), Some("Secondary Button"));
    assert_eq!(
        markup_classes(&doc),
        vec![
            "Button--large--dark--secondary",
            "Button--large--dark--secondary is-disabled"
        ]
    );
    assert_eq!(
        css.trim(),
        ".Button--large--dark--secondary {
  color: #666;
  width: 200px;
}
.Button--large--dark--secondary:disabled, .Button--large--dark--secondary.is-disabled {
  opacity: 0.1;
}"
    );
}

fn capitalized(parts: &NameParts<'_>) -> String {
    std::iter::once(parts.block)
        .chain(parts.modifiers.iter().map(String::as_str))
        .map(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}

fn custom_selector(parts: &NameParts<'_>) -> Result<String, NamingError> {
    let class = format!(".{}", capitalized(parts));
    let Some(state) = parts.state else {
        return Ok(class);
    };
    let name = parse_state(state)?;
    if name.pseudo_class {
        Ok(format!("{class}{state}, {class}__{}", name.bare))
    } else {
        Ok(format!("{class}__{}", name.bare))
    }
}

fn custom_dom_class(parts: &NameParts<'_>) -> Result<String, NamingError> {
    let class = capitalized(parts);
    match parts.state {
        Some(state) => Ok(format!("{class}__{}", parse_state(state)?.bare)),
        None => Ok(class),
    }
}

#[test]
fn test_custom_selector_naming() {
    let input = "@block Button {
  color: #333;
  @modifier secondary {
    color: #666;
    @state :hover {
      outline: none;
    }
  }
  @state :disabled {
    opacity: 0.1;
  }
}";
    let options = CompileOptions::new()
        .with_modifier("secondary")
        .with_selector_naming(custom_selector);
    let output = compile_css(input, &options).unwrap();
    assert_eq!(
        output.css,
        ".ButtonSecondary {
  color: #666;
}
.ButtonSecondary:disabled, .ButtonSecondary__disabled {
  opacity: 0.1;
}
.ButtonSecondary:hover, .ButtonSecondary__hover {
  outline: none;
}"
    );
}

#[test]
fn test_custom_dom_naming() {
    let options = CompileOptions::new()
        .with_modifier("secondary")
        .with_selector_naming(custom_selector)
        .with_dom_naming(custom_dom_class);
    let output = compile_css(SIMPLE, &options).unwrap();
    let (doc, css) = split_output(&output.css);

    assert_eq!(doc.name.as_deref(), Some("Secondary Button"));
    assert_eq!(
        markup_classes(&doc),
        vec!["ButtonSecondary", "ButtonSecondary__disabled"]
    );
    assert_eq!(
        css,
        "\n.ButtonSecondary {\n  color: #666;\n}\n.ButtonSecondary:disabled, .ButtonSecondary__disabled {\n  opacity: 0.1;\n}\n"
    );
}

#[test]
fn test_invalid_topdoc_fails_the_block() {
    let input = "/* topdoc\nname: [unclosed\n*/\n@block Button {\n  color: #333;\n}\n@block Menu {}";
    let output = compile_css(input, &CompileOptions::new()).unwrap();
    assert_eq!(output.report.failures.len(), 1);
    assert_eq!(output.report.failures[0].block(), Some("Button"));
    assert!(output.css.contains("@block Button"));
    assert!(output.css.ends_with(".Menu {}"));
}

#[test]
fn test_plain_comment_before_block_is_kept() {
    let input = "/* just a note */\n@block Button {\n  color: #333;\n}";
    let output = compile_css(input, &CompileOptions::new()).unwrap();
    assert_eq!(output.css, "/* just a note */\n.Button {\n  color: #333;\n}");
}
