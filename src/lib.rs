//! ModScope - Module dependency graph and import optimization analyzer
//!
//! This crate builds a per-file record of import and export declarations
//! for a JavaScript/TypeScript source tree, resolves relative imports into
//! a directed dependency graph, detects circular dependency chains, and
//! computes a minimal, deduplicated import statement set per file.

pub mod analyzer;
pub mod extractor;
pub mod graph;
pub mod optimize;
pub mod registry;
pub mod report;
pub mod resolve;
