//! Selector and DOM class naming.
//!
//! A compiled block needs two names for every `{block, modifiers, state}`
//! combination: the CSS selector of the flat rule, and the value of the
//! HTML `class` attribute used in documentation markup. Both are
//! strategies the caller can replace; [`BemNaming`] is the default.

use thiserror::Error;

/// Input to a naming strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameParts<'a> {
    /// Block name, e.g. `Button`.
    pub block: &'a str,
    /// Active modifiers in configured order. Empty when none is active.
    pub modifiers: &'a [String],
    /// State parameter as written, e.g. `:disabled` or `open`.
    pub state: Option<&'a str>,
}

impl<'a> NameParts<'a> {
    /// Parts for a block's base rule.
    #[must_use]
    pub const fn new(block: &'a str, modifiers: &'a [String]) -> Self {
        Self {
            block,
            modifiers,
            state: None,
        }
    }

    /// The same parts with a state.
    #[must_use]
    pub const fn with_state(self, state: &'a str) -> Self {
        Self {
            state: Some(state),
            ..self
        }
    }
}

/// Errors raised by naming strategies.
#[derive(Debug, Error)]
pub enum NamingError {
    /// The state is not `name` or `:name` with `name` made of ASCII letters,
    /// digits and `_`.
    #[error("invalid state `{state}`: expected `name` or `:name`")]
    InvalidState {
        /// The state as written.
        state: String,
    },

    /// Failure of a caller-supplied strategy.
    #[error(transparent)]
    Custom(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Maps name parts to the selector of a flat rule.
pub trait NameSelector {
    /// Build the selector text.
    ///
    /// # Errors
    /// Implementations report unusable parts as [`NamingError`].
    fn selector(&self, parts: &NameParts<'_>) -> Result<String, NamingError>;
}

/// Maps name parts to the value of an HTML `class` attribute.
pub trait NameDomClass {
    /// Build the class attribute value.
    ///
    /// # Errors
    /// Implementations report unusable parts as [`NamingError`].
    fn dom_class(&self, parts: &NameParts<'_>) -> Result<String, NamingError>;
}

impl<F> NameSelector for F
where
    F: Fn(&NameParts<'_>) -> Result<String, NamingError>,
{
    fn selector(&self, parts: &NameParts<'_>) -> Result<String, NamingError> {
        self(parts)
    }
}

impl<F> NameDomClass for F
where
    F: Fn(&NameParts<'_>) -> Result<String, NamingError>,
{
    fn dom_class(&self, parts: &NameParts<'_>) -> Result<String, NamingError> {
        self(parts)
    }
}

/// A state split into its name and whether it was written as a
/// pseudo-class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateName<'a> {
    /// The name without a leading colon.
    pub bare: &'a str,
    /// Whether the state was written `:name`.
    pub pseudo_class: bool,
}

/// Split a state parameter.
///
/// ```
/// use bemflat_compiler::parse_state;
///
/// let state = parse_state(":disabled").unwrap();
/// assert_eq!(state.bare, "disabled");
/// assert!(state.pseudo_class);
/// assert!(parse_state("is open").is_err());
/// ```
///
/// # Errors
/// [`NamingError::InvalidState`] if the parameter is not `name` or `:name`
/// with `name` a non-empty run of ASCII letters, digits or `_`.
pub fn parse_state(state: &str) -> Result<StateName<'_>, NamingError> {
    let (bare, pseudo_class) = match state.strip_prefix(':') {
        Some(rest) => (rest, true),
        None => (state, false),
    };
    if bare.is_empty() || !bare.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(NamingError::InvalidState {
            state: state.to_string(),
        });
    }
    Ok(StateName { bare, pseudo_class })
}

/// Block, element, modifier naming:
///
/// | parts                                 | selector                                          | DOM class                |
/// |---------------------------------------|---------------------------------------------------|--------------------------|
/// | `Button`                              | `.Button`                                         | `Button`                 |
/// | `Button`, `[secondary]`               | `.Button--secondary`                              | `Button--secondary`      |
/// | `Button`, `[secondary]`, `:disabled`  | `.Button--secondary:disabled, .Button--secondary.is-disabled` | `Button--secondary is-disabled` |
/// | `menu`, `[]`, `open`                  | `.menu.is-open`                                   | `menu is-open`           |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BemNaming;

impl BemNaming {
    fn class_name(parts: &NameParts<'_>) -> String {
        let mut class = parts.block.to_string();
        for modifier in parts.modifiers {
            class.push_str("--");
            class.push_str(modifier);
        }
        class
    }
}

impl NameSelector for BemNaming {
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Pseudo-class states also match the `is-` class so scripts can force
    /// the state.
    fn selector(&self, parts: &NameParts<'_>) -> Result<String, NamingError> {
        let class = format!(".{}", Self::class_name(parts));
        let Some(state) = parts.state else {
            return Ok(class);
        };
        let name = parse_state(state)?;
        if name.pseudo_class {
            Ok(format!("{class}{state}, {class}.is-{}", name.bare))
        } else {
            Ok(format!("{class}.is-{}", name.bare))
        }
    }
}

impl NameDomClass for BemNaming {
    fn dom_class(&self, parts: &NameParts<'_>) -> Result<String, NamingError> {
        let class = Self::class_name(parts);
        match parts.state {
            Some(state) => Ok(format!("{class} is-{}", parse_state(state)?.bare)),
            None => Ok(class),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state_shapes() {
        assert_eq!(
            parse_state("open").unwrap(),
            StateName {
                bare: "open",
                pseudo_class: false
            }
        );
        assert!(parse_state(":").is_err());
        assert!(parse_state("::before").is_err());
        assert!(parse_state(":hover:focus").is_err());
        assert!(parse_state("").is_err());
    }
}
