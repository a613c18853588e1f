//! One page with both views built once.

use statline_foundation::Result;

use crate::query::{DocumentView, NodeQuery, SelectedNode};
use crate::token::TokenStream;
use crate::tree::DocumentTree;

/// A fetched page: the raw text, its flattened tokens, and its node tree.
#[derive(Clone, Debug)]
pub struct Document {
    raw: String,
    tokens: TokenStream,
    tree: DocumentTree,
}

impl Document {
    /// Builds both views from raw markup.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let tokens = TokenStream::from_markup(&raw);
        let tree = DocumentTree::from_markup(&raw);
        tracing::trace!(
            bytes = raw.len(),
            tokens = tokens.len(),
            nodes = tree.len(),
            "document parsed"
        );
        Self { raw, tokens, tree }
    }

    /// Assembles a document from views built elsewhere.
    #[must_use]
    pub fn from_parts(raw: impl Into<String>, tokens: TokenStream, tree: DocumentTree) -> Self {
        Self {
            raw: raw.into(),
            tokens,
            tree,
        }
    }

    /// The raw markup.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns true if the raw markup contains `marker`.
    #[must_use]
    pub fn contains(&self, marker: &str) -> bool {
        self.raw.contains(marker)
    }

    /// A fresh cursor over the page's tokens.
    #[must_use]
    pub fn token_stream(&self) -> TokenStream {
        let mut tokens = self.tokens.clone();
        tokens.rewind();
        tokens
    }

    /// The page's node tree.
    #[must_use]
    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }
}

impl DocumentView for Document {
    fn select(&self, query: &NodeQuery) -> Result<Vec<SelectedNode>> {
        self.tree.select(query)
    }
}
