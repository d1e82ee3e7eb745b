//! Set-based directed graph over code keys.
//!
//! Wraps a `petgraph` [`DiGraph`] and keeps a `HashMap<String, NodeIndex>`
//! for lookups by code. Node indices follow first insertion, and every
//! traversal visits successors in that order, so results are reproducible for
//! a given input. Adding an edge that already exists is a no-op: duplicate
//! composition rows collapse to one adjacency here, unlike in
//! [`AdjacencyTree`](crate::AdjacencyTree).

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{Bfs, EdgeRef};

use crate::node::{node_label, normalize_code};

#[derive(Debug, Clone, Default)]
pub struct DirectedGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = Self::new();
        for (source, target) in edges {
            graph.add_edge(source, target);
        }
        graph
    }

    /// Insert a node if it is not present yet.
    pub fn add_node(&mut self, key: &str) -> NodeIndex {
        let key = normalize_code(key);
        if let Some(idx) = self.index.get(&key) {
            return *idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.index.insert(key, idx);
        idx
    }

    /// Insert the edge `source -> target`. Inserting it twice keeps one edge.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let a = self.add_node(source);
        let b = self.add_node(target);
        self.graph.update_edge(a, b, ());
    }

    pub fn has_node(&self, key: &str) -> bool {
        self.index.contains_key(&normalize_code(key))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .map(move |idx| self.graph[idx].as_str())
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].as_str(),
                    self.graph[edge.target()].as_str(),
                )
            })
            .collect()
    }

    /// Direct successors of `key` in insertion order.
    pub fn successors(&self, key: &str) -> Vec<&str> {
        match self.index.get(&normalize_code(key)) {
            Some(idx) => self
                .ordered_successors(*idx)
                .into_iter()
                .map(|succ| self.graph[succ].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    fn ordered_successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut successors: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        successors.sort();
        successors
    }

    /// Find a cycle anywhere in the graph.
    ///
    /// Every node is tried as a DFS start, so the result does not depend on
    /// the root. The cycle is returned as its edges, a self-loop on `A`
    /// being `[(A, A)]`.
    pub fn detect_cycles(&self) -> Option<Vec<(String, String)>> {
        let mut state = vec![Visit::New; self.graph.node_count()];

        for start in self.graph.node_indices() {
            if state[start.index()] != Visit::New {
                continue;
            }
            state[start.index()] = Visit::OnPath;
            let mut path = vec![start];
            let mut stack = vec![Frame {
                node: start,
                successors: self.ordered_successors(start),
                next: 0,
            }];

            while let Some(frame) = stack.last_mut() {
                if frame.next >= frame.successors.len() {
                    state[frame.node.index()] = Visit::Done;
                    stack.pop();
                    path.pop();
                    continue;
                }
                let child = frame.successors[frame.next];
                frame.next += 1;

                match state[child.index()] {
                    Visit::OnPath => {
                        let pos = path.iter().position(|n| *n == child).unwrap_or(0);
                        let mut nodes = path[pos..].to_vec();
                        nodes.push(child);
                        let cycle: Vec<(String, String)> = nodes
                            .windows(2)
                            .map(|pair| (self.graph[pair[0]].clone(), self.graph[pair[1]].clone()))
                            .collect();
                        tracing::debug!(length = cycle.len(), "cycle found in composition graph");
                        return Some(cycle);
                    }
                    Visit::Done => continue,
                    Visit::New => {
                        state[child.index()] = Visit::OnPath;
                        path.push(child);
                        stack.push(Frame {
                            node: child,
                            successors: self.ordered_successors(child),
                            next: 0,
                        });
                    }
                }
            }
        }
        None
    }

    /// Partition into weakly connected components, largest first.
    ///
    /// Among components of equal size the one holding `main_root` comes
    /// first; the others keep the order of their first node.
    pub fn weakly_connected_components(&self, main_root: &str) -> Vec<DirectedGraph> {
        let mut sets = UnionFind::new(self.graph.node_count());
        for edge in self.graph.edge_references() {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut groups: Vec<Vec<NodeIndex>> = Vec::new();
        let mut group_of: HashMap<usize, usize> = HashMap::new();
        for idx in self.graph.node_indices() {
            let representative = sets.find(idx.index());
            let group = *group_of.entry(representative).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(idx);
        }

        let mut components: Vec<DirectedGraph> = groups
            .iter()
            .map(|members| self.induced_subgraph(members))
            .collect();
        components.sort_by_key(|component| {
            (
                std::cmp::Reverse(component.node_count()),
                !component.has_node(main_root),
            )
        });
        components
    }

    /// Every weakly connected component except the main one.
    ///
    /// The main hierarchy is the largest component, or the one holding
    /// `main_root` when sizes tie; the rest are islands detached from it.
    /// Empty and connected graphs give no islands.
    pub fn detect_disconnected_components(&self, main_root: &str) -> Vec<DirectedGraph> {
        let components = self.weakly_connected_components(main_root);
        if components.len() <= 1 {
            return Vec::new();
        }
        components.into_iter().skip(1).collect()
    }

    /// Orient the graph away from `root`.
    ///
    /// Each node reachable from `root` gets exactly one parent: the node
    /// through which a breadth-first walk first reached it. Returns `None`
    /// when `root` is not in the graph.
    pub fn convert_to_tree(&self, root: &str) -> Option<RootedTree> {
        let root_idx = *self.index.get(&normalize_code(root))?;
        let mut tree = DirectedGraph::new();
        tree.add_node(&self.graph[root_idx]);

        let mut seen = HashSet::from([root_idx]);
        let mut queue = VecDeque::from([root_idx]);
        while let Some(node) = queue.pop_front() {
            for child in self.ordered_successors(node) {
                if seen.insert(child) {
                    tree.add_edge(&self.graph[node], &self.graph[child]);
                    queue.push_back(child);
                }
            }
        }

        Some(RootedTree {
            root: self.graph[root_idx].clone(),
            graph: tree,
        })
    }

    /// Nodes without successors.
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|idx| {
                self.graph
                    .neighbors_directed(*idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// Induced subgraph of everything reachable from `key`, `key` included.
    ///
    /// An unknown key gives an empty graph.
    pub fn breadth_first_search_from_node(&self, key: &str) -> DirectedGraph {
        let Some(start) = self.index.get(&normalize_code(key)).copied() else {
            return DirectedGraph::new();
        };
        let mut reached = Vec::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(node) = bfs.next(&self.graph) {
            reached.push(node);
        }
        reached.sort();
        self.induced_subgraph(&reached)
    }

    fn induced_subgraph(&self, members: &[NodeIndex]) -> DirectedGraph {
        let member_set: HashSet<NodeIndex> = members.iter().copied().collect();
        let mut sub = DirectedGraph::new();
        for idx in members {
            sub.add_node(&self.graph[*idx]);
        }
        for edge in self.graph.edge_references() {
            if member_set.contains(&edge.source()) && member_set.contains(&edge.target()) {
                sub.add_edge(&self.graph[edge.source()], &self.graph[edge.target()]);
            }
        }
        sub
    }

    /// Render the edges as `src -> dst, src2 -> dst2`.
    ///
    /// A graph without edges renders its node labels instead.
    pub fn generate_graph_report(&self) -> String {
        if self.graph.edge_count() == 0 {
            return self.nodes().map(node_label).collect::<Vec<_>>().join(", ");
        }
        self.edges()
            .into_iter()
            .map(|(source, target)| format!("{} -> {}", node_label(source), node_label(target)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A directed tree derived from a [`DirectedGraph`] by orienting it away
/// from a designated root.
#[derive(Debug, Clone)]
pub struct RootedTree {
    root: String,
    graph: DirectedGraph,
}

impl RootedTree {
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Immediate children of the root.
    pub fn root_children(&self) -> Vec<&str> {
        self.children(&self.root)
    }

    pub fn children(&self, key: &str) -> Vec<&str> {
        self.graph.successors(key)
    }

    /// Descendants of `key` (and `key` itself) as a subgraph.
    pub fn subtree(&self, key: &str) -> DirectedGraph {
        self.graph.breadth_first_search_from_node(key)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
