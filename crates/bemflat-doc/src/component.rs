use bemflat_syntax::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DocError;

/// First word of every topdoc comment.
pub const TOPDOC_MARKER: &str = "topdoc";

/// A documentation record read from a topdoc comment.
///
/// `name`, `description` and `markup` are the fields the compiler knows
/// about; any other key is kept in `extra`, in source order, and written
/// back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocComponent {
    /// Display name of the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Handlebars template producing example markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    /// Every other key of the mapping.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,

    /// Source offset just past the comment's `*/`.
    #[serde(skip)]
    pub comment_end: Option<usize>,
    /// The comment node this record was read from.
    #[serde(skip)]
    pub comment: Option<NodeId>,
}

impl DocComponent {
    /// Read a record from comment text (delimiters and surrounding
    /// whitespace already stripped).
    ///
    /// Returns `Ok(None)` for comments that are not topdoc comments. A
    /// topdoc comment with nothing after the marker line is an empty record.
    ///
    /// # Errors
    /// [`DocError::Yaml`] if the text after the marker line is not a YAML
    /// mapping.
    pub fn from_comment(text: &str) -> Result<Option<Self>, DocError> {
        let Some(rest) = text.strip_prefix(TOPDOC_MARKER) else {
            return Ok(None);
        };
        let (first_line, body) = rest.split_once('\n').unwrap_or((rest, ""));
        // `topdocs`, `topdoc-foo`, ... are ordinary comments
        if !first_line.trim().is_empty() {
            return Ok(None);
        }
        if body.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let component = serde_yaml::from_str(body)?;
        Ok(Some(component))
    }

    /// Shallow merge: every field set in `other` replaces the one in `self`.
    /// Extra keys are overwritten in place or appended. Bookkeeping fields
    /// are left alone.
    pub fn merge(&mut self, other: &Self) {
        if let Some(name) = &other.name {
            self.name = Some(name.clone());
        }
        if let Some(description) = &other.description {
            self.description = Some(description.clone());
        }
        if let Some(markup) = &other.markup {
            self.markup = Some(markup.clone());
        }
        for (key, value) in &other.extra {
            let _ = self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.markup.is_none()
            && self.extra.is_empty()
    }

    /// Comment text for this record: the marker line followed by the YAML
    /// mapping, without a trailing newline.
    ///
    /// # Errors
    /// [`DocError::Yaml`] if an extra value cannot be written as YAML.
    pub fn serialize(&self) -> Result<String, DocError> {
        if self.is_empty() {
            return Ok(TOPDOC_MARKER.to_string());
        }
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("{TOPDOC_MARKER}\n{}", yaml.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_topdoc() {
        assert_eq!(DocComponent::from_comment("just a note").unwrap(), None);
        assert_eq!(DocComponent::from_comment("topdocs\nname: x").unwrap(), None);
    }

    #[test]
    fn test_marker_only() {
        let doc = DocComponent::from_comment("topdoc").unwrap().unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.serialize().unwrap(), "topdoc");
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut base = DocComponent {
            name: Some("Button".to_string()),
            description: Some("a button".to_string()),
            ..DocComponent::default()
        };
        let other = DocComponent {
            name: Some("Secondary Button".to_string()),
            ..DocComponent::default()
        };
        base.merge(&other);
        assert_eq!(base.name.as_deref(), Some("Secondary Button"));
        assert_eq!(base.description.as_deref(), Some("a button"));
    }
}
