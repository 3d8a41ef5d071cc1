use handlebars::Handlebars;
use serde::Serialize;

use crate::error::DocError;

/// Render a markup template against `context`.
///
/// Output is not HTML-escaped: the markup is example HTML and class names
/// are inserted verbatim. Missing fields render as empty strings.
///
/// ```
/// use bemflat_doc::render_markup;
/// use serde_json::json;
///
/// let html = render_markup(
///     r#"{{#each state}}<b class="{{this}}"/>{{/each}}"#,
///     &json!({ "state": ["Button", "Button is-disabled"] }),
/// )
/// .unwrap();
/// assert_eq!(html, r#"<b class="Button"/><b class="Button is-disabled"/>"#);
/// ```
///
/// # Errors
/// [`DocError::Render`] if the template does not parse or fails to render.
pub fn render_markup<T: Serialize>(template: &str, context: &T) -> Result<String, DocError> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry.set_strict_mode(false);
    Ok(registry.render_template(template, context)?)
}
