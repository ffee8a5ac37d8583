//! Circular dependency detection.
//!
//! Enumerates the distinct cycles in a module graph with a depth-first
//! traversal that maintains a recursion-stack set and an ordered path list.
//! The traversal uses explicit `(node, next-child)` frames instead of
//! recursion, so deep import chains cannot overflow the call stack.

use std::collections::HashSet;

use crate::graph::ModuleGraph;
use crate::registry::FileId;

/// A circular dependency chain.
///
/// `nodes` is a closed walk `f0 -> f1 -> ... -> f0`: the first element is
/// repeated at the end, and no other element repeats. Every consecutive
/// pair is a present edge in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// The files in the cycle, first element repeated last.
    pub nodes: Vec<FileId>,
}

impl Cycle {
    /// Returns the number of distinct files in the cycle.
    ///
    /// A self-import counts as one.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Returns true for a degenerate empty cycle (does not occur in practice).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this cycle is a file importing itself.
    pub fn is_self_import(&self) -> bool {
        self.len() == 1
    }

    /// Returns a formatted representation of the cycle path.
    ///
    /// For example: "a.ts -> b.ts -> a.ts"
    pub fn path(&self) -> String {
        self.nodes
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Finds all distinct cycles in the graph.
///
/// Each cycle is reported exactly once regardless of which node the
/// traversal discovers it from; rotations of the same chain are collapsed.
/// Nodes are expanded in sorted order so the result is deterministic. A
/// graph with no cycles yields an empty vec, which is success rather than
/// an error.
///
/// # Example
///
/// ```rust
/// use modscope::graph::{find_cycles, ModuleGraph};
/// use modscope::registry::FileId;
///
/// let mut graph = ModuleGraph::new();
/// graph.add_module(FileId::new("a.ts"));
/// graph.add_module(FileId::new("b.ts"));
/// graph.add_import_edge(&FileId::new("a.ts"), &FileId::new("b.ts"));
/// graph.add_import_edge(&FileId::new("b.ts"), &FileId::new("a.ts"));
///
/// let cycles = find_cycles(&graph);
/// assert_eq!(cycles.len(), 1);
/// assert_eq!(cycles[0].path(), "a.ts -> b.ts -> a.ts");
/// ```
pub fn find_cycles(graph: &ModuleGraph) -> Vec<Cycle> {
    let adjacency = graph.adjacency();

    // Sorted neighbor lists make the traversal order reproducible.
    let neighbors: Vec<(&FileId, Vec<&FileId>)> = adjacency
        .iter()
        .map(|(id, targets)| (id, targets.iter().collect()))
        .collect();
    let index_of = |id: &FileId| neighbors.binary_search_by(|(n, _)| (*n).cmp(id)).ok();

    let mut visited: HashSet<usize> = HashSet::new();
    let mut cycles = Vec::new();
    let mut seen_keys: HashSet<Vec<FileId>> = HashSet::new();

    for start in 0..neighbors.len() {
        if visited.contains(&start) {
            continue;
        }

        // Frames hold the node plus the position of its next unexplored child.
        let mut frames: Vec<(usize, usize)> = vec![(start, 0)];
        let mut on_stack: HashSet<usize> = HashSet::new();
        let mut path: Vec<usize> = vec![start];
        visited.insert(start);
        on_stack.insert(start);

        while let Some(frame) = frames.last_mut() {
            let node = frame.0;
            let targets = &neighbors[node].1;

            if frame.1 >= targets.len() {
                frames.pop();
                on_stack.remove(&node);
                path.pop();
                continue;
            }

            let target = targets[frame.1];
            frame.1 += 1;

            let Some(target_idx) = index_of(target) else {
                continue;
            };

            if on_stack.contains(&target_idx) {
                // Closed a cycle: the sub-path from the target's earliest
                // occurrence, plus the repeated node.
                if let Some(pos) = path.iter().position(|&n| n == target_idx) {
                    let mut chain: Vec<FileId> =
                        path[pos..].iter().map(|&n| neighbors[n].0.clone()).collect();
                    chain.push(neighbors[target_idx].0.clone());

                    if seen_keys.insert(canonical_key(&chain)) {
                        cycles.push(Cycle { nodes: chain });
                    }
                }
            } else if !visited.contains(&target_idx) {
                visited.insert(target_idx);
                on_stack.insert(target_idx);
                path.push(target_idx);
                frames.push((target_idx, 0));
            }
            // A globally-visited node not on the stack short-circuits
            // further descent, bounding the work to O(V+E).
        }
    }

    cycles
}

/// Canonical rotation of a cycle chain, used to collapse rotations of the
/// same cycle into one report.
///
/// The closing repeat is dropped and the remaining sequence rotated so the
/// smallest element comes first.
fn canonical_key(chain: &[FileId]) -> Vec<FileId> {
    let open = &chain[..chain.len() - 1];
    let min_pos = open
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut rotated = open.to_vec();
    rotated.rotate_left(min_pos);
    rotated
}
