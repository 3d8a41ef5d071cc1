//! Walking a component and collecting its nested parts.
//!
//! The walk is destructive: every `@modifier`, `@state` and `@element` is
//! snapshotted and then removed from the tree, leaving the block with only
//! its own declarations and pass-through content.

use bemflat_doc::{DocComponent, DocError, DocIndex};
use bemflat_syntax::{NodeId, Stylesheet, outdent};
use indexmap::IndexMap;

use crate::breakdown::{Breakdown, resolve_breakdown};
use crate::kind::ComponentKind;

/// A nested at-rule captured during classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedPart {
    /// Where the at-rule sat in the component.
    pub breakdown: Breakdown,
    /// What kind of at-rule it was.
    pub kind: ComponentKind,
    /// Detached copy of the at-rule without the nested parts it contained.
    pub node: NodeId,
}

/// Everything a block compile needs from the walk.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Captured parts in document order (pre-order).
    pub nested_parts: Vec<NestedPart>,
    /// Configured modifiers found in the block, in encounter order.
    pub active_modifiers: Vec<String>,
    /// Documentation preceding each `@modifier`, by modifier name.
    pub modifier_docs: IndexMap<String, DocComponent>,
}

impl Classification {
    /// Parts captured from inside `@modifier modifier` (or the modifier
    /// itself), in document order.
    pub fn parts_for_modifier<'a>(
        &'a self,
        modifier: &'a str,
    ) -> impl Iterator<Item = &'a NestedPart> + 'a {
        self.nested_parts
            .iter()
            .filter(move |part| part.breakdown.modifier.as_deref() == Some(modifier))
    }
}

/// Walk `block` and collect its nested parts.
///
/// Each part is outdented one level per nesting depth so that it reads as a
/// top-level rule. Every `@modifier` name is appended to `discovered` (first
/// discovery wins, no duplicates); a topdoc comment immediately preceding a
/// modifier is captured and removed. A nested `@block` is left in place
/// without being walked.
///
/// # Errors
/// [`DocError::InvalidComment`] if a modifier is preceded by an unreadable
/// topdoc comment.
pub fn classify_component(
    sheet: &mut Stylesheet,
    block: NodeId,
    configured_modifiers: &[String],
    discovered: &mut Vec<String>,
    docs: &DocIndex,
) -> Result<Classification, DocError> {
    let mut walker = Walker {
        sheet,
        configured_modifiers,
        discovered,
        docs,
        classification: Classification::default(),
    };
    walker.visit_children(block)?;
    Ok(walker.classification)
}

struct Walker<'a> {
    sheet: &'a mut Stylesheet,
    configured_modifiers: &'a [String],
    discovered: &'a mut Vec<String>,
    docs: &'a DocIndex,
    classification: Classification,
}

impl Walker<'_> {
    fn visit_children(&mut self, parent: NodeId) -> Result<(), DocError> {
        let children = self.sheet.children(parent).to_vec();
        for child in children {
            // removed while visiting an earlier sibling
            if self.sheet.parent(child) != Some(parent) {
                continue;
            }
            match part_kind(self.sheet, child) {
                Some(ComponentKind::Block) => {
                    tracing::debug!("nested @block left as written");
                }
                Some(kind) => self.visit_part(child, kind)?,
                None => self.visit_children(child)?,
            }
        }
        Ok(())
    }

    fn visit_part(&mut self, node: NodeId, kind: ComponentKind) -> Result<(), DocError> {
        outdent(self.sheet, node, 1);
        let breakdown = resolve_breakdown(self.sheet, node);

        if kind == ComponentKind::Modifier {
            self.record_modifier(node)?;
        }

        let snapshot = self.sheet.clone_subtree(node);
        prune_parts(self.sheet, snapshot);
        self.classification.nested_parts.push(NestedPart {
            breakdown,
            kind,
            node: snapshot,
        });

        // Children first: they still need this node in their ancestry.
        self.visit_children(node)?;
        self.sheet.remove(node);
        Ok(())
    }

    fn record_modifier(&mut self, node: NodeId) -> Result<(), DocError> {
        let name = self
            .sheet
            .as_at_rule(node)
            .map(|at_rule| at_rule.params.clone())
            .unwrap_or_default();

        if let Some((comment, doc)) = self.docs.component_before(self.sheet, node)? {
            let doc = doc.clone();
            self.sheet.remove(comment);
            let _ = self.classification.modifier_docs.entry(name.clone()).or_insert(doc);
        }

        if name.is_empty() {
            return Ok(());
        }
        if !self.discovered.contains(&name) {
            self.discovered.push(name.clone());
        }
        if self.configured_modifiers.contains(&name)
            && !self.classification.active_modifiers.contains(&name)
        {
            self.classification.active_modifiers.push(name);
        }
        Ok(())
    }
}

/// The component kind of `node`, if it is an at-rule the compiler knows.
fn part_kind(sheet: &Stylesheet, node: NodeId) -> Option<ComponentKind> {
    sheet
        .as_at_rule(node)
        .and_then(|at_rule| ComponentKind::from_at_rule_name(&at_rule.name))
}

/// Drop the nested parts from a snapshot; they are captured on their own.
fn prune_parts(sheet: &mut Stylesheet, node: NodeId) {
    for child in sheet.children(node).to_vec() {
        match part_kind(sheet, child) {
            Some(ComponentKind::Block) => {}
            Some(_) => sheet.remove(child),
            None => prune_parts(sheet, child),
        }
    }
}
