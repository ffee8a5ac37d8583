//! Module dependency graph construction and cycle detection.
//!
//! The graph is derived from a completed registry: every registered file is
//! a node (files with no relative imports are isolated nodes), and each
//! resolvable relative import contributes one deduplicated edge from
//! importer to importee. The graph is recomputed fully on every analysis
//! run; there is no incremental update.

pub mod cycles;
pub mod module_graph;

pub use cycles::{find_cycles, Cycle};
pub use module_graph::ModuleGraph;
