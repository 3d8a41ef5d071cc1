//! Documentation sync for compiled blocks.

use bemflat_doc::{DocComponent, DocIndex, render_markup};
use bemflat_syntax::{NodeId, Stylesheet};
use indexmap::IndexMap;
use serde_json::json;

use crate::compile::BlockContext;
use crate::error::CompileError;

/// New text for the topdoc comment preceding a compiled block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocUpdate {
    /// The comment to rewrite.
    pub(crate) comment: NodeId,
    /// Its new text.
    pub(crate) text: String,
}

/// Merge the documentation of the block's active modifiers into the
/// block's own topdoc comment, render its markup with the compiled class
/// names and serialize it.
///
/// The markup template sees `state`: the block's DOM class followed by the
/// DOM class of every state rule, in emission order.
///
/// Returns `None` when no topdoc comment precedes the block.
pub(crate) fn sync_documentation(
    sheet: &Stylesheet,
    block: NodeId,
    docs: &DocIndex,
    context: &BlockContext<'_>,
    modifier_docs: &IndexMap<String, DocComponent>,
) -> Result<Option<DocUpdate>, CompileError> {
    let found = docs
        .component_before(sheet, block)
        .map_err(|source| CompileError::documentation(&context.name, source))?;
    let Some((comment, doc)) = found else {
        return Ok(None);
    };

    let mut merged = doc.clone();
    for modifier in &context.active_modifiers {
        if let Some(modifier_doc) = modifier_docs.get(modifier) {
            merged.merge(modifier_doc);
        }
    }

    let mut classes = vec![context.dom_class(None)?];
    for (_, rule) in context.registry.iter() {
        classes.push(context.dom_class(Some(&rule.state))?);
    }
    tracing::debug!(block = %context.name, ?classes, "rendering documentation");

    if let Some(markup) = &merged.markup {
        let rendered = render_markup(markup, &json!({ "state": classes }))
            .map_err(|source| CompileError::documentation(&context.name, source))?;
        merged.markup = Some(rendered);
    }
    let text = merged
        .serialize()
        .map_err(|source| CompileError::documentation(&context.name, source))?;
    Ok(Some(DocUpdate { comment, text }))
}
