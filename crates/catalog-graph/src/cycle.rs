//! Depth-first cycle detection over an [`AdjacencyTree`].
//!
//! The search is iterative so deep hierarchies cannot overflow the stack.
//! A cycle is signalled only by a child that is on the *current* path; nodes
//! whose subtrees were fully explored are recorded in `visited` and never
//! explored again, which keeps the whole-tree scan linear in the edge count.

use std::collections::HashSet;

use crate::node::node_label;
use crate::tree::AdjacencyTree;

/// Find the first cycle reachable from `start`.
///
/// Returns the cycle as a node path that starts and ends on the repeated
/// node: `A -> B -> C -> A` gives `[A, B, C, A]` and a self-loop on `A`
/// gives `[A, A]`.
pub fn detect_from<'a>(
    tree: &'a AdjacencyTree,
    start: &'a str,
    visited: &mut HashSet<String>,
) -> Option<Vec<String>> {
    if visited.contains(start) {
        return None;
    }

    let mut path: Vec<&str> = vec![start];
    let mut on_path: HashSet<&str> = HashSet::from([start]);
    let mut stack: Vec<(&str, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        let children = tree.children(node);

        if next >= children.len() {
            stack.pop();
            path.pop();
            on_path.remove(node);
            visited.insert(node.to_string());
            continue;
        }
        frame.1 += 1;

        let child = children[next].as_str();
        if on_path.contains(child) {
            if let Some(pos) = path.iter().position(|n| *n == child) {
                let mut cycle: Vec<String> = path[pos..].iter().map(|n| n.to_string()).collect();
                cycle.push(child.to_string());
                return Some(cycle);
            }
        }
        if visited.contains(child) {
            continue;
        }

        path.push(child);
        on_path.insert(child);
        stack.push((child, 0));
    }

    None
}

/// Find the first cycle anywhere in the tree.
///
/// Every parent is tried as a start node, in first-seen order, so cycles in
/// components that do not hang from the conventional root are found too.
pub fn detect_in_tree(tree: &AdjacencyTree) -> Option<Vec<String>> {
    let mut visited = HashSet::new();
    for parent in tree.parents() {
        if let Some(cycle) = detect_from(tree, parent, &mut visited) {
            tracing::debug!(length = cycle.len() - 1, "cycle found in adjacency tree");
            return Some(cycle);
        }
    }
    None
}

/// Render a cycle path as `A -> B, B -> C, C -> A`.
pub fn format_cycle_path(path: &[String]) -> String {
    path.windows(2)
        .map(|pair| format!("{} -> {}", node_label(&pair[0]), node_label(&pair[1])))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(pairs: &[(&str, &str)]) -> AdjacencyTree {
        let mut tree = AdjacencyTree::new();
        for (parent, child) in pairs {
            tree.push_edge(parent, child);
        }
        tree
    }

    #[test]
    fn finds_three_node_cycle() {
        let tree = tree(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let cycle = detect_in_tree(&tree).expect("cycle");
        assert_eq!(cycle, vec!["A", "B", "C", "A"]);
        assert_eq!(format_cycle_path(&cycle), "A -> B, B -> C, C -> A");
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let tree = tree(&[("A", "A")]);
        assert_eq!(detect_in_tree(&tree), Some(vec!["A".to_string(), "A".to_string()]));
    }

    #[test]
    fn cycle_path_is_suffix_from_repeated_node() {
        let tree = tree(&[("0", "1"), ("1", "2"), ("2", "3"), ("3", "2")]);
        let mut visited = HashSet::new();
        let cycle = detect_from(&tree, "0", &mut visited).expect("cycle");
        assert_eq!(cycle, vec!["2", "3", "2"]);
        assert_eq!(format_cycle_path(&cycle), "2 -> 3, 3 -> 2");
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let tree = tree(&[("1", "2"), ("1", "3"), ("2", "4"), ("3", "4")]);
        assert_eq!(detect_in_tree(&tree), None);
    }

    #[test]
    fn finds_cycle_in_detached_component() {
        let tree = tree(&[("0", "1"), ("1", "2"), ("7", "8"), ("8", "7")]);
        let mut visited = HashSet::new();
        assert_eq!(detect_from(&tree, "0", &mut visited), None);
        assert!(visited.contains("2"));
        assert_eq!(
            detect_in_tree(&tree),
            Some(vec!["7".to_string(), "8".to_string(), "7".to_string()])
        );
    }

    #[test]
    fn empty_tree_has_no_cycle() {
        assert_eq!(detect_in_tree(&AdjacencyTree::new()), None);
    }
}
