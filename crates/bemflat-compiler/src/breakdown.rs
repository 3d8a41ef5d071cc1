use bemflat_syntax::{NodeId, Stylesheet};

use crate::kind::ComponentKind;

/// Which block, modifier, state and element a node belongs to.
///
/// Every field comes from the nearest enclosing at-rule of that kind, the
/// node itself included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    /// Name of the enclosing `@block`.
    pub block: Option<String>,
    /// Name of the enclosing `@modifier`.
    pub modifier: Option<String>,
    /// Parameter of the enclosing `@state`, colon kept.
    pub state: Option<String>,
    /// Name of the enclosing `@element`.
    pub element: Option<String>,
}

/// Walk from `node` up to the root and record the nearest at-rule of each
/// kind. Kinds never override each other; a detached node yields what its
/// own subtree root chain provides.
#[must_use]
pub fn resolve_breakdown(sheet: &Stylesheet, node: NodeId) -> Breakdown {
    let mut breakdown = Breakdown::default();
    for id in std::iter::once(node).chain(sheet.ancestors(node)) {
        let Some(at_rule) = sheet.as_at_rule(id) else {
            continue;
        };
        let Some(kind) = ComponentKind::from_at_rule_name(&at_rule.name) else {
            continue;
        };
        let slot = match kind {
            ComponentKind::Block => &mut breakdown.block,
            ComponentKind::Modifier => &mut breakdown.modifier,
            ComponentKind::State => &mut breakdown.state,
            ComponentKind::Element => &mut breakdown.element,
        };
        if slot.is_none() {
            *slot = Some(at_rule.params.clone());
        }
    }
    breakdown
}
