use bemflat_syntax::{NodeId, Stylesheet};
use indexmap::IndexMap;

use crate::merge::{convert_at_rule, merge_declarations};

/// A flat state rule being built for one selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRule {
    /// The detached rule node.
    pub rule: NodeId,
    /// State parameter the rule was first created for, as written.
    pub state: String,
}

/// State rules of one block, keyed by selector, in the order selectors
/// were first resolved. Emission follows this order.
#[derive(Debug, Clone, Default)]
pub struct StateRegistry {
    rules: IndexMap<String, StateRule>,
}

impl StateRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route the contents of the `@state` snapshot `source` to `selector`.
    ///
    /// The first source for a selector becomes its rule (keeping the
    /// snapshot's formatting); later ones are merged into it.
    pub fn resolve_state(
        &mut self,
        sheet: &mut Stylesheet,
        selector: String,
        source: NodeId,
        state: &str,
    ) {
        if let Some(existing) = self.rules.get(&selector) {
            tracing::trace!(%selector, "merging into existing state rule");
            let incoming = sheet.children(source).to_vec();
            merge_declarations(sheet, existing.rule, &incoming);
            return;
        }
        let rule = convert_at_rule(sheet, source, selector.clone());
        let _ = self.rules.insert(
            selector,
            StateRule {
                rule,
                state: state.to_string(),
            },
        );
    }

    /// Rules in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateRule)> {
        self.rules.iter().map(|(selector, rule)| (selector.as_str(), rule))
    }

    /// Rule node of `selector`, if resolved.
    #[must_use]
    pub fn get(&self, selector: &str) -> Option<NodeId> {
        self.rules.get(selector).map(|entry| entry.rule)
    }

    /// Number of distinct selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no state was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
