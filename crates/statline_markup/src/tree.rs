//! Lenient markup → node tree builder.
//!
//! Game pages are not well-formed: unclosed paragraphs, unquoted attributes,
//! stray end tags. The builder never fails. Unmatched end tags are ignored,
//! an end tag closes every element opened after its matching start tag, and
//! void elements never take children.
//!
//! Nodes live in an arena and are created in document order, so comparing
//! [`NodeId`]s compares document positions.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::{TAG_PATTERN, decode_entities};

static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(/?)([A-Za-z][A-Za-z0-9:-]*)").expect("tag name pattern is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+)))?"#)
        .expect("attribute pattern is valid")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Position of a node in its tree's arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The document root.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a node holds.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The document root.
    Document,
    /// An element with a lowercase tag name and its attributes in source order.
    Element {
        /// Lowercase tag name.
        name: String,
        /// Attributes as (lowercase name, decoded value) pairs.
        attributes: Vec<(String, String)>,
    },
    /// A run of decoded text.
    Text(String),
}

/// A node in a [`DocumentTree`].
#[derive(Clone, Debug)]
pub struct Node {
    /// What the node holds.
    pub kind: NodeKind,
    /// Parent node; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

impl Node {
    /// Returns the tag name if this node is an element.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the value of an attribute if this node is an element that
    /// carries it.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

/// A navigable tree view of one page.
#[derive(Clone, Debug)]
pub struct DocumentTree {
    nodes: Vec<Node>,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// Creates a tree holding only the document root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Builds a tree from raw markup.
    #[must_use]
    pub fn from_markup(raw: &str) -> Self {
        let mut tree = Self::new();
        let mut open = vec![NodeId::ROOT];
        let mut position = 0;

        while let Some(tag) = TAG_PATTERN.find_at(raw, position) {
            let parent = open.last().copied().unwrap_or(NodeId::ROOT);
            tree.push_text(parent, &raw[position..tag.start()]);
            position = tag.end();

            let Some(caps) = TAG_NAME.captures(tag.as_str()) else {
                // comment, doctype, processing instruction
                continue;
            };
            let name = caps[2].to_ascii_lowercase();

            if &caps[1] == "/" {
                if let Some(depth) = open
                    .iter()
                    .rposition(|id| tree.node(*id).tag() == Some(name.as_str()))
                {
                    if depth > 0 {
                        open.truncate(depth);
                    }
                }
                continue;
            }

            let attributes = parse_attributes(&tag.as_str()[caps[0].len()..]);
            let self_closing = tag.as_str().ends_with("/>");
            let id = tree.append_element(parent, &name, attributes);

            if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                let close = format!("</{name}");
                let rest = &raw[position..];
                let end = rest
                    .to_ascii_lowercase()
                    .find(&close)
                    .map_or(raw.len(), |offset| position + offset);
                tree.push_text(id, &raw[position..end]);
                position = raw[end..].find('>').map_or(raw.len(), |offset| end + offset + 1);
                continue;
            }

            if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                open.push(id);
            }
        }

        let parent = open.last().copied().unwrap_or(NodeId::ROOT);
        tree.push_text(parent, &raw[position..]);
        tree
    }

    /// Appends an element under `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        attributes: Vec<(String, String)>,
    ) -> NodeId {
        self.append(
            parent,
            NodeKind::Element {
                name: name.to_ascii_lowercase(),
                attributes,
            },
        )
    }

    /// Appends a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeKind::Text(text.to_string()))
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push_text(&mut self, parent: NodeId, raw: &str) {
        if raw.trim().is_empty() {
            return;
        }
        self.append_text(parent, &decode_entities(raw));
    }

    /// Returns the number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds only the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Returns a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Iterates every node id in document order, root first.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterates the ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).parent, |current| self.node(*current).parent)
    }

    /// Iterates the siblings after a node, in document order.
    pub fn following_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let siblings: &[NodeId] = match self.node(id).parent {
            Some(parent) => &self.node(parent).children,
            None => &[],
        };
        let start = siblings.iter().position(|s| *s == id).map_or(siblings.len(), |i| i + 1);
        siblings[start..].iter().copied()
    }

    /// Concatenated text of a node and all its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        if let NodeKind::Text(text) = &node.kind {
            out.push_str(text);
        }
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }
}

fn parse_attributes(source: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(source)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or_else(String::new, |m| decode_entities(m.as_str()));
            (name, value)
        })
        .collect()
}
