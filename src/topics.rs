//! Navigation tree of help topics.
//!
//! The tree is defined once in `help/tree.json` and shared by the terminal
//! browser and the generated site. Each node's `label` is a bundle key;
//! its `id` is the dotted page id.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const TREE_JSON: &str = include_str!("../help/tree.json");

#[derive(Debug, Error)]
pub enum TopicError {
    #[error("invalid topic tree definition")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate topic id `{0}`")]
    Duplicate(String),
}

/// A topic and its subtopics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl TopicNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTree {
    roots: Vec<TopicNode>,
}

impl TopicTree {
    /// The tree compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded definition is malformed.
    pub fn embedded() -> Result<Self, TopicError> {
        Self::from_json(TREE_JSON)
    }

    /// Parse a tree definition.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid JSON or when two nodes share an id.
    pub fn from_json(json: &str) -> Result<Self, TopicError> {
        let roots: Vec<TopicNode> = serde_json::from_str(json)?;
        let tree = Self { roots };
        let mut seen = HashSet::new();
        for id in tree.ids() {
            if !seen.insert(id) {
                return Err(TopicError::Duplicate(id.to_string()));
            }
        }
        Ok(tree)
    }

    pub fn roots(&self) -> &[TopicNode] {
        &self.roots
    }

    /// All topic ids in reading order.
    pub fn ids(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [TopicNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                out.push(&node.id);
                walk(&node.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, &mut out);
        out
    }

    /// Ids of the nodes enclosing `id`, outermost first.
    pub fn ancestors(&self, id: &str) -> Option<Vec<&str>> {
        fn walk<'a>(nodes: &'a [TopicNode], id: &str, path: &mut Vec<&'a str>) -> bool {
            for node in nodes {
                if node.id == id {
                    return true;
                }
                path.push(&node.id);
                if walk(&node.children, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
        let mut path = Vec::new();
        walk(&self.roots, id, &mut path).then_some(path)
    }
}

/// One visible line of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: String,
    pub label: String,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Expanded/collapsed state of the navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeState {
    expanded: HashSet<String>,
}

impl TreeState {
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    /// Flip a node and return whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expand every ancestor of `id` so that it shows up in the rows.
    pub fn reveal(&mut self, tree: &TopicTree, id: &str) {
        if let Some(path) = tree.ancestors(id) {
            for ancestor in path {
                self.expand(ancestor);
            }
        }
    }

    /// Flatten the tree into the rows currently visible.
    pub fn visible_rows(&self, tree: &TopicTree) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.push_rows(tree.roots(), 0, &mut rows);
        rows
    }

    fn push_rows(&self, nodes: &[TopicNode], depth: usize, rows: &mut Vec<TreeRow>) {
        for node in nodes {
            let expanded = node.has_children() && self.is_expanded(&node.id);
            rows.push(TreeRow {
                id: node.id.clone(),
                label: node.label.clone(),
                depth,
                has_children: node.has_children(),
                expanded,
            });
            if expanded {
                self.push_rows(&node.children, depth + 1, rows);
            }
        }
    }
}

/// Relative link to a topic page.
pub fn href(id: &str) -> String {
    format!("{id}.html")
}

/// Topic id for a relative page link, `None` for external links.
pub fn id_from_href(href: &str) -> Option<&str> {
    let path = href.split('#').next().unwrap_or_default();
    if path.is_empty() || path.contains(['/', ':', '?']) {
        return None;
    }
    let id = path
        .strip_suffix(".html")
        .or_else(|| path.strip_suffix(".php"))?;
    (!id.is_empty()).then_some(id)
}
