//! Per-block compilation and the stylesheet driver.
//!
//! A block compiles in two phases against a detached copy of itself:
//!
//! 1. States written directly in the block resolve to selectors built
//!    from the block name and the active modifiers.
//! 2. For each active modifier, in configured order, the modifier's own
//!    declarations merge into the base rule and its states resolve like
//!    phase 1 states, merging into rules that already exist.
//!
//! The live tree changes only once both phases and the documentation sync
//! have succeeded.

use bemflat_common::warning::warn_once;
use bemflat_doc::DocIndex;
use bemflat_syntax::{NodeId, Stylesheet};

use crate::classify::{NestedPart, classify_component};
use crate::docs::sync_documentation;
use crate::error::CompileError;
use crate::kind::ComponentKind;
use crate::merge::{convert_at_rule, merge_declarations};
use crate::naming::NameParts;
use crate::options::CompileOptions;
use crate::registry::StateRegistry;

/// What happened to each component of a stylesheet.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Every modifier name found in the stylesheet, in discovery order.
    pub modifiers: Vec<String>,
    /// Blocks that compiled, in document order.
    pub compiled: Vec<String>,
    /// Blocks that failed and were left as written.
    pub failures: Vec<CompileError>,
}

impl CompileReport {
    /// Whether every block compiled.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-block compile state.
pub(crate) struct BlockContext<'a> {
    pub(crate) name: String,
    pub(crate) active_modifiers: Vec<String>,
    pub(crate) registry: StateRegistry,
    options: &'a CompileOptions,
}

impl BlockContext<'_> {
    fn parts<'s>(&'s self, state: Option<&'s str>) -> NameParts<'s> {
        NameParts {
            block: &self.name,
            modifiers: &self.active_modifiers,
            state,
        }
    }

    pub(crate) fn selector(&self, state: Option<&str>) -> Result<String, CompileError> {
        self.options
            .selector_naming()
            .selector(&self.parts(state))
            .map_err(|err| CompileError::naming(&self.name, err))
    }

    pub(crate) fn dom_class(&self, state: Option<&str>) -> Result<String, CompileError> {
        self.options
            .dom_naming()
            .dom_class(&self.parts(state))
            .map_err(|err| CompileError::naming(&self.name, err))
    }

    /// Resolve a `@state` part into the registry.
    fn resolve_state_part(
        &mut self,
        sheet: &mut Stylesheet,
        part: &NestedPart,
    ) -> Result<(), CompileError> {
        let state = part.breakdown.state.as_deref().unwrap_or_default();
        let selector = self.selector(Some(state))?;
        self.registry.resolve_state(sheet, selector, part.node, state);
        Ok(())
    }
}

/// Compile every top-level `@block` of `sheet` in document order.
///
/// A block that fails is left untouched, reported in
/// [`CompileReport::failures`] and logged once; the others still compile.
pub fn compile_stylesheet(sheet: &mut Stylesheet, options: &CompileOptions) -> CompileReport {
    let docs = DocIndex::from_stylesheet(sheet);
    let mut report = CompileReport::default();

    for block in find_blocks(sheet) {
        match compile_block(sheet, block, options, &docs, &mut report.modifiers) {
            Ok(name) => report.compiled.push(name),
            Err(err) => {
                let _ = warn_once("compiler", &err.to_string());
                report.failures.push(err);
            }
        }
    }
    tracing::debug!(
        compiled = report.compiled.len(),
        failed = report.failures.len(),
        modifiers = ?report.modifiers,
        "stylesheet compiled"
    );
    report
}

/// Compile one `@block` in place and return its name.
///
/// The block is replaced by its base rule followed by its state rules, and
/// the topdoc comment preceding it (if any) is rewritten. Modifier names
/// found in the block are appended to `discovered` even if the compile
/// fails afterwards.
///
/// # Errors
/// Any [`CompileError`]; the tree is left unchanged.
pub fn compile_block(
    sheet: &mut Stylesheet,
    block: NodeId,
    options: &CompileOptions,
    docs: &DocIndex,
    discovered: &mut Vec<String>,
) -> Result<String, CompileError> {
    let name = sheet
        .as_at_rule(block)
        .map(|at_rule| at_rule.params.clone())
        .unwrap_or_default();
    if name.is_empty() {
        let position = sheet
            .get(block)
            .and_then(|node| node.source)
            .map_or(0, |span| span.start);
        return Err(CompileError::EmptyBlockName { position });
    }

    let configured = options.configured_modifiers();
    let work = sheet.clone_subtree(block);
    let classification = classify_component(sheet, work, &configured, discovered, docs)
        .map_err(|source| CompileError::documentation(&name, source))?;

    let active_modifiers: Vec<String> = configured
        .iter()
        .filter(|modifier| classification.active_modifiers.contains(modifier))
        .cloned()
        .collect();
    tracing::debug!(
        block = %name,
        parts = classification.nested_parts.len(),
        active = ?active_modifiers,
        "classified component"
    );

    let mut context = BlockContext {
        name,
        active_modifiers,
        registry: StateRegistry::new(),
        options,
    };
    let base = convert_at_rule(sheet, work, context.selector(None)?);

    // Phase 1: states of the block itself.
    for part in &classification.nested_parts {
        if part.kind == ComponentKind::State
            && part.breakdown.modifier.is_none()
            && part.breakdown.element.is_none()
        {
            context.resolve_state_part(sheet, part)?;
        }
    }

    // Phase 2: active modifiers, later ones win.
    for modifier in context.active_modifiers.clone() {
        tracing::trace!(block = %context.name, %modifier, "applying modifier");
        for part in classification.parts_for_modifier(&modifier) {
            if part.breakdown.element.is_some() {
                continue;
            }
            match part.kind {
                ComponentKind::Modifier => {
                    let incoming = sheet.children(part.node).to_vec();
                    merge_declarations(sheet, base, &incoming);
                }
                ComponentKind::State => context.resolve_state_part(sheet, part)?,
                ComponentKind::Block | ComponentKind::Element => {}
            }
        }
    }

    let skipped = classification
        .nested_parts
        .iter()
        .filter(|part| part.breakdown.element.is_some())
        .count();
    if skipped > 0 {
        tracing::debug!(block = %context.name, skipped, "@element parts produce no rules");
    }

    let doc_update = sync_documentation(
        sheet,
        block,
        docs,
        &context,
        &classification.modifier_docs,
    )?;

    // Commit.
    sheet.replace_with(block, base);
    let mut anchor = base;
    for (_, rule) in context.registry.iter() {
        sheet.insert_after(anchor, rule.rule);
        anchor = rule.rule;
    }
    if let Some(update) = doc_update
        && let Some(comment) = sheet.as_comment_mut(update.comment)
    {
        comment.text = update.text;
    }
    Ok(context.name)
}

/// `@block` at-rules that are not inside another `@block`.
fn find_blocks(sheet: &Stylesheet) -> Vec<NodeId> {
    let is_block = |id: NodeId| {
        sheet
            .as_at_rule(id)
            .and_then(|at_rule| ComponentKind::from_at_rule_name(&at_rule.name))
            == Some(ComponentKind::Block)
    };
    sheet
        .descendants(sheet.root())
        .into_iter()
        .filter(|&id| is_block(id) && !sheet.ancestors(id).any(is_block))
        .collect()
}
