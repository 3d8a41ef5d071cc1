use strum_macros::{Display, EnumString};

/// At-rules with a meaning inside a component. Every other at-rule is
/// passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ComponentKind {
    /// `@block Name { ... }`
    Block,
    /// `@modifier name { ... }`
    Modifier,
    /// `@state :pseudo { ... }` or `@state name { ... }`
    State,
    /// `@element name { ... }`
    Element,
}

impl ComponentKind {
    /// Classify an at-rule name (without `@`). `None` means pass-through.
    #[must_use]
    pub fn from_at_rule_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ComponentKind::from_at_rule_name("state"), Some(ComponentKind::State));
        assert_eq!(ComponentKind::from_at_rule_name("media"), None);
        assert_eq!(ComponentKind::from_at_rule_name("Block"), None);
        assert_eq!(ComponentKind::Modifier.to_string(), "modifier");
    }
}
