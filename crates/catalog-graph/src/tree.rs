//! Adjacency tree built from composition edges.

use std::collections::HashMap;

use crate::edge::CompositionEdge;
use crate::node::normalize_code;

/// Parent -> ordered children mapping.
///
/// Children keep insertion order and duplicates, so a composition row that
/// appears twice yields the child twice. Parents iterate in the order they
/// were first seen, which keeps cycle detection reproducible.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyTree {
    order: Vec<String>,
    children: HashMap<String, Vec<String>>,
}

impl AdjacencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `child` to the children of `parent`. Both codes are normalized.
    pub fn push_edge(&mut self, parent: &str, child: &str) {
        let parent = normalize_code(parent);
        let child = normalize_code(child);
        match self.children.get_mut(&parent) {
            Some(list) => list.push(child),
            None => {
                self.order.push(parent.clone());
                self.children.insert(parent, vec![child]);
            }
        }
    }

    /// Children of `parent`, empty when it has none.
    pub fn children(&self, parent: &str) -> &[String] {
        self.children
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parents in first-seen order.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of parents.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of stored edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }
}

/// Build an [`AdjacencyTree`] from cleaned composition edges.
///
/// An empty edge set yields an empty tree.
pub fn build_tree<'a, I>(edges: I) -> AdjacencyTree
where
    I: IntoIterator<Item = &'a CompositionEdge>,
{
    let mut tree = AdjacencyTree::new();
    for edge in edges {
        tree.push_edge(&edge.parent, &edge.child);
    }
    tracing::debug!(
        parents = tree.len(),
        edges = tree.edge_count(),
        "built adjacency tree"
    );
    tree
}
