//! Composition graph and tree model for indicator catalogs.
//!
//! Two representations are built from the same parent/child edge set:
//!
//! - [`AdjacencyTree`]: parent -> ordered children, duplicates preserved.
//!   Used by the tree checks together with [`detect_in_tree`] and
//!   [`validate_level_hierarchy`].
//! - [`DirectedGraph`]: a set-based directed graph used for whole-graph
//!   cycle detection, weakly connected components, rooted tree conversion
//!   and subtree extraction.
//!
//! All node keys are normalized code strings (see [`normalize_code`]).

pub mod cycle;
pub mod digraph;
pub mod edge;
pub mod levels;
pub mod node;
pub mod tree;

pub use cycle::{detect_from, detect_in_tree, format_cycle_path};
pub use digraph::{DirectedGraph, RootedTree};
pub use edge::CompositionEdge;
pub use levels::{LevelMap, LevelViolation, validate_level_hierarchy};
pub use node::{node_label, normalize_code};
pub use tree::{AdjacencyTree, build_tree};
