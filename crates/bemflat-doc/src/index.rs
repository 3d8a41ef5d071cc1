use bemflat_syntax::{NodeId, Stylesheet};
use indexmap::IndexMap;

use crate::component::DocComponent;
use crate::error::DocError;

/// Every topdoc comment of a stylesheet, keyed by the source offset just
/// past its closing `*/`.
///
/// Offsets survive subtree cloning, so a record can be found from a
/// detached copy of the tree as well as from the live one.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    components: IndexMap<usize, DocComponent>,
    /// Topdoc comments that failed to parse, with the reader's message.
    invalid: IndexMap<usize, String>,
}

impl DocIndex {
    /// Scan all comments of `sheet`. Comments without a source span
    /// (synthesized nodes) are ignored.
    #[must_use]
    pub fn from_stylesheet(sheet: &Stylesheet) -> Self {
        let mut index = Self::default();
        for id in sheet.descendants(sheet.root()) {
            let Some(comment) = sheet.as_comment(id) else {
                continue;
            };
            let Some(span) = sheet.get(id).and_then(|node| node.source) else {
                continue;
            };
            match DocComponent::from_comment(&comment.text) {
                Ok(Some(mut component)) => {
                    component.comment_end = Some(span.end);
                    component.comment = Some(id);
                    let _ = index.components.insert(span.end, component);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(position = span.end, "unreadable topdoc comment: {err}");
                    let _ = index.invalid.insert(span.end, err.to_string());
                }
            }
        }
        index
    }

    /// Look up the record whose comment ends at `position`.
    ///
    /// # Errors
    /// [`DocError::InvalidComment`] if a topdoc comment ends there but could
    /// not be read.
    pub fn find_component_by_comment_end(
        &self,
        position: usize,
    ) -> Result<Option<&DocComponent>, DocError> {
        if let Some(message) = self.invalid.get(&position) {
            return Err(DocError::InvalidComment {
                position,
                message: message.clone(),
            });
        }
        Ok(self.components.get(&position))
    }

    /// The record of the comment immediately preceding `node`, together
    /// with that comment's id in `sheet`.
    ///
    /// # Errors
    /// See [`DocIndex::find_component_by_comment_end`].
    pub fn component_before(
        &self,
        sheet: &Stylesheet,
        node: NodeId,
    ) -> Result<Option<(NodeId, &DocComponent)>, DocError> {
        let Some(prev) = sheet.prev_sibling(node) else {
            return Ok(None);
        };
        if sheet.as_comment(prev).is_none() {
            return Ok(None);
        }
        let Some(span) = sheet.get(prev).and_then(|n| n.source) else {
            return Ok(None);
        };
        Ok(self
            .find_component_by_comment_end(span.end)?
            .map(|component| (prev, component)))
    }

    /// Number of readable topdoc comments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the stylesheet had no readable topdoc comments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Readable records in document order.
    pub fn iter(&self) -> impl Iterator<Item = &DocComponent> {
        self.components.values()
    }
}
