use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::naming::{BemNaming, NameDomClass, NameSelector};

/// The JSON configuration file.
///
/// ```json
/// { "modifiers": ["large", "dark"] }
/// ```
///
/// `modifier` is the older single-modifier form; `modifiers` wins when both
/// are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// A single modifier to compile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    /// Modifiers to compile, in the order their suffixes are appended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,
}

impl Config {
    /// Read a configuration from JSON text.
    ///
    /// # Errors
    /// Returns the JSON error if `json` is not a configuration object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// How to compile a stylesheet.
#[derive(Clone)]
pub struct CompileOptions {
    modifier: Option<String>,
    modifiers: Option<Vec<String>>,
    selector_naming: Arc<dyn NameSelector + Send + Sync>,
    dom_naming: Arc<dyn NameDomClass + Send + Sync>,
}

impl CompileOptions {
    /// No modifiers and BEM naming.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modifier: None,
            modifiers: None,
            selector_naming: Arc::new(BemNaming),
            dom_naming: Arc::new(BemNaming),
        }
    }

    /// Compile a single modifier. Ignored once [`Self::with_modifiers`] is
    /// set.
    #[must_use]
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    /// Compile these modifiers, in this order.
    #[must_use]
    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = Some(modifiers.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the selector naming strategy.
    #[must_use]
    pub fn with_selector_naming(mut self, naming: impl NameSelector + Send + Sync + 'static) -> Self {
        self.selector_naming = Arc::new(naming);
        self
    }

    /// Replace the DOM class naming strategy.
    #[must_use]
    pub fn with_dom_naming(mut self, naming: impl NameDomClass + Send + Sync + 'static) -> Self {
        self.dom_naming = Arc::new(naming);
        self
    }

    /// The modifiers to compile: `modifiers` if set, else `modifier`.
    /// Empty names are dropped and duplicates keep their first position.
    #[must_use]
    pub fn configured_modifiers(&self) -> Vec<String> {
        let requested = match (&self.modifiers, &self.modifier) {
            (Some(list), _) => list.as_slice(),
            (None, Some(single)) => std::slice::from_ref(single),
            (None, None) => &[],
        };
        let mut configured: Vec<String> = Vec::with_capacity(requested.len());
        for name in requested {
            let name = name.trim();
            if !name.is_empty() && !configured.iter().any(|seen| seen == name) {
                configured.push(name.to_string());
            }
        }
        configured
    }

    /// The selector naming strategy.
    #[must_use]
    pub fn selector_naming(&self) -> &dyn NameSelector {
        self.selector_naming.as_ref()
    }

    /// The DOM class naming strategy.
    #[must_use]
    pub fn dom_naming(&self) -> &dyn NameDomClass {
        self.dom_naming.as_ref()
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Config> for CompileOptions {
    fn from(config: Config) -> Self {
        let mut options = Self::new();
        options.modifier = config.modifier;
        options.modifiers = config.modifiers;
        options
    }
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("modifier", &self.modifier)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_supersede_modifier() {
        let options = CompileOptions::new()
            .with_modifier("secondary")
            .with_modifiers(["large", "dark", "large", ""]);
        assert_eq!(options.configured_modifiers(), vec!["large", "dark"]);
    }

    #[test]
    fn test_legacy_modifier() {
        let options = CompileOptions::new().with_modifier("secondary");
        assert_eq!(options.configured_modifiers(), vec!["secondary"]);
        assert!(CompileOptions::new().configured_modifiers().is_empty());
    }

    #[test]
    fn test_config_from_json() {
        let config = Config::from_json(r#"{"modifier": "cta", "modifiers": ["a", "b"]}"#).unwrap();
        let options = CompileOptions::from(config);
        assert_eq!(options.configured_modifiers(), vec!["a", "b"]);

        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::from_json("[]").is_err());
    }
}
