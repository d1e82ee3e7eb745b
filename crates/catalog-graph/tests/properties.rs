//! Property tests for the composition graph algorithms.

use std::collections::HashSet;

use proptest::prelude::*;

use catalog_graph::{AdjacencyTree, DirectedGraph, detect_in_tree};

fn ring(len: usize, offset: usize) -> Vec<(String, String)> {
    (0..len)
        .map(|step| {
            let i = (step + offset) % len;
            (i.to_string(), ((i + 1) % len).to_string())
        })
        .collect()
}

/// Random tree edges: node `i` hangs from some node below `i`.
fn tree_edges() -> impl Strategy<Value = Vec<(String, String)>> {
    (2usize..24)
        .prop_flat_map(|n| {
            let parents: Vec<_> = (1..n).map(|i| 0..i).collect();
            parents
        })
        .prop_map(|parents| {
            parents
                .into_iter()
                .enumerate()
                .map(|(i, parent)| (parent.to_string(), (i + 1).to_string()))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn path_component(first: usize, len: usize) -> Vec<(String, String)> {
    (first..first + len - 1)
        .map(|i| (i.to_string(), (i + 1).to_string()))
        .collect()
}

proptest! {
    #[test]
    fn rotated_ring_always_reports_its_own_edges(len in 1usize..10, offset in 0usize..10) {
        let edges = ring(len, offset);
        let graph = DirectedGraph::from_edges(edges.iter().map(|(a, b)| (a.as_str(), b.as_str())));
        let cycle = graph.detect_cycles().expect("ring is cyclic");
        prop_assert!(!cycle.is_empty());
        let known: HashSet<(String, String)> = edges.into_iter().collect();
        for edge in &cycle {
            prop_assert!(known.contains(edge));
        }
    }

    #[test]
    fn trees_never_report_cycles(edges in tree_edges()) {
        let graph = DirectedGraph::from_edges(edges.iter().map(|(a, b)| (a.as_str(), b.as_str())));
        prop_assert_eq!(graph.detect_cycles(), None);

        let mut tree = AdjacencyTree::new();
        for (parent, child) in &edges {
            tree.push_edge(parent, child);
        }
        prop_assert_eq!(detect_in_tree(&tree), None);
        prop_assert!(graph.detect_disconnected_components("0").is_empty());
    }

    #[test]
    fn island_count_ignores_edge_order(
        edges in Just(
            [path_component(0, 5), path_component(10, 3), path_component(20, 3)].concat()
        ).prop_shuffle()
    ) {
        let graph = DirectedGraph::from_edges(edges.iter().map(|(a, b)| (a.as_str(), b.as_str())));
        let islands = graph.detect_disconnected_components("0");
        prop_assert_eq!(islands.len(), 2);
        prop_assert!(islands.iter().all(|island| island.node_count() == 3));
    }
}
