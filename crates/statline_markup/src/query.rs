//! Structural queries and the [`DocumentView`] capability.
//!
//! A [`NodeQuery`] selects elements by tag and attribute substring, can
//! exclude elements nested inside a container with a given `id`, and can pull
//! in the first following sibling of a given tag for each match. Results
//! come back in document order without duplicates.

use std::collections::BTreeSet;

use statline_foundation::{Error, Result};

use crate::tree::{DocumentTree, NodeId, NodeKind};

/// A structural query over a document tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeQuery {
    /// Tag name of the primary matches.
    pub tag: String,
    /// Attribute that must contain [`NodeQuery::contains`].
    pub attribute: Option<String>,
    /// Substring the attribute must contain.
    pub contains: String,
    /// Exclude matches nested anywhere inside an element with this `id`.
    pub excluding_within_id: Option<String>,
    /// Also select the first following sibling with this tag, per match.
    pub following_sibling: Option<String>,
}

impl NodeQuery {
    /// Selects every element with the given tag.
    #[must_use]
    pub fn elements(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Requires `attribute` to contain `needle`.
    #[must_use]
    pub fn with_attribute_containing(mut self, attribute: &str, needle: &str) -> Self {
        self.attribute = Some(attribute.to_ascii_lowercase());
        self.contains = needle.to_string();
        self
    }

    /// Excludes matches inside the element with this `id`.
    #[must_use]
    pub fn excluding_within_id(mut self, id: &str) -> Self {
        self.excluding_within_id = Some(id.to_string());
        self
    }

    /// Also selects the first following sibling with `tag` for each match.
    #[must_use]
    pub fn with_following_sibling(mut self, tag: &str) -> Self {
        self.following_sibling = Some(tag.to_ascii_lowercase());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.tag.is_empty() {
            return Err(Error::structural_query("query has no tag"));
        }
        if self.attribute.as_deref() == Some("") {
            return Err(Error::structural_query("attribute filter has no name"));
        }
        if self.following_sibling.as_deref() == Some("") {
            return Err(Error::structural_query("following-sibling filter has no tag"));
        }
        Ok(())
    }
}

/// One node returned by a query, detached from the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedNode {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes as (lowercase name, value) pairs.
    pub attributes: Vec<(String, String)>,
    /// Text content of the node and its descendants.
    pub text: String,
}

impl SelectedNode {
    /// Returns the value of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A document that can answer structural queries.
pub trait DocumentView {
    /// Runs a query, returning matches in document order.
    ///
    /// # Errors
    ///
    /// Returns `StructuralQuery` if the query is invalid or the engine fails.
    fn select(&self, query: &NodeQuery) -> Result<Vec<SelectedNode>>;
}

impl DocumentTree {
    fn matches(&self, id: NodeId, query: &NodeQuery) -> bool {
        let node = self.node(id);
        if node.tag() != Some(query.tag.as_str()) {
            return false;
        }
        if let Some(attribute) = &query.attribute {
            match node.attribute(attribute) {
                Some(value) if value.contains(&query.contains) => {}
                _ => return false,
            }
        }
        if let Some(container) = &query.excluding_within_id {
            if self
                .ancestors(id)
                .any(|ancestor| self.node(ancestor).attribute("id") == Some(container.as_str()))
            {
                return false;
            }
        }
        true
    }

    fn detach(&self, id: NodeId) -> SelectedNode {
        let node = self.node(id);
        SelectedNode {
            tag: node.tag().unwrap_or_default().to_string(),
            attributes: match &node.kind {
                NodeKind::Element { attributes, .. } => attributes.clone(),
                _ => Vec::new(),
            },
            text: self.text_content(id),
        }
    }
}

impl DocumentView for DocumentTree {
    fn select(&self, query: &NodeQuery) -> Result<Vec<SelectedNode>> {
        query.validate()?;

        let mut selected = BTreeSet::new();
        for id in self.ids().filter(|id| self.matches(*id, query)) {
            selected.insert(id);
            if let Some(sibling_tag) = &query.following_sibling {
                if let Some(sibling) = self
                    .following_siblings(id)
                    .find(|s| self.node(*s).tag() == Some(sibling_tag.as_str()))
                {
                    selected.insert(sibling);
                }
            }
        }

        tracing::trace!(tag = %query.tag, matches = selected.len(), "structural query");
        Ok(selected.into_iter().map(|id| self.detach(id)).collect())
    }
}
