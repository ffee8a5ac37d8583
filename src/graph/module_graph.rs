//! File-to-file dependency graph implementation using petgraph.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::registry::{FileId, ModuleRegistry};
use crate::resolve::PathResolver;

/// A directed graph of module dependencies.
///
/// Nodes are [`FileId`]s; an edge from A to B means "A imports B" through a
/// relative specifier that resolved to B. Multiple import statements from
/// the same importer to the same importee collapse to one edge.
///
/// # Example
///
/// ```rust
/// use modscope::graph::ModuleGraph;
/// use modscope::registry::FileId;
///
/// let mut graph = ModuleGraph::new();
/// graph.add_module(FileId::new("src/a.ts"));
/// graph.add_module(FileId::new("src/b.ts"));
/// graph.add_import_edge(&FileId::new("src/a.ts"), &FileId::new("src/b.ts"));
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    /// The underlying directed graph
    graph: DiGraph<FileId, ()>,
    /// Maps file identities to their node indices for O(1) lookup
    node_indices: HashMap<FileId, NodeIndex>,
}

impl ModuleGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Builds the graph from a completed registry.
    ///
    /// Every registered file becomes a node, so files with zero relative
    /// imports still participate as isolated nodes. Each malformed import
    /// declaration is skipped; each resolvable relative import contributes
    /// one deduplicated edge.
    pub fn from_registry(registry: &ModuleRegistry) -> Self {
        let resolver = PathResolver::new(registry);
        let mut graph = Self::with_capacity(registry.len(), registry.total_imports());

        for id in registry.file_ids() {
            graph.add_module(id.clone());
        }

        for (id, record) in registry.iter() {
            for import in &record.imports {
                if import.is_malformed() {
                    continue;
                }
                if let Some(target) = resolver.resolve(id, &import.source) {
                    graph.add_import_edge(id, &target);
                }
            }
        }

        graph
    }

    /// Adds a module node, returning its index.
    ///
    /// Adding an already-present module returns the existing index.
    pub fn add_module(&mut self, id: FileId) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_indices.insert(id, idx);
        idx
    }

    /// Adds a dependency edge from importer to importee.
    ///
    /// Returns `false` if either node is missing or the edge already
    /// exists (edges are deduplicated).
    pub fn add_import_edge(&mut self, from: &FileId, to: &FileId) -> bool {
        let (Some(&from_idx), Some(&to_idx)) =
            (self.node_indices.get(from), self.node_indices.get(to))
        else {
            return false;
        };

        if self.graph.find_edge(from_idx, to_idx).is_some() {
            return false;
        }

        self.graph.add_edge(from_idx, to_idx, ());
        true
    }

    /// Returns the files directly imported by the given file, sorted.
    pub fn imports_of(&self, id: &FileId) -> Vec<&FileId> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        let mut targets: Vec<&FileId> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge| self.graph.node_weight(edge.target()))
            .collect();
        targets.sort();
        targets
    }

    /// Returns the files that directly import the given file, sorted.
    pub fn imported_by(&self, id: &FileId) -> Vec<&FileId> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        let mut sources: Vec<&FileId> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .filter_map(|edge| self.graph.node_weight(edge.source()))
            .collect();
        sources.sort();
        sources
    }

    /// Returns the full adjacency mapping, sorted at both levels.
    ///
    /// Every node appears as a key, including isolated nodes with empty
    /// adjacency sets.
    pub fn adjacency(&self) -> BTreeMap<FileId, BTreeSet<FileId>> {
        let mut adjacency = BTreeMap::new();

        for idx in self.graph.node_indices() {
            let Some(id) = self.graph.node_weight(idx) else {
                continue;
            };
            let targets: BTreeSet<FileId> = self
                .graph
                .edges_directed(idx, Direction::Outgoing)
                .filter_map(|edge| self.graph.node_weight(edge.target()))
                .cloned()
                .collect();
            adjacency.insert(id.clone(), targets);
        }

        adjacency
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if a module exists in the graph.
    pub fn contains(&self, id: &FileId) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
