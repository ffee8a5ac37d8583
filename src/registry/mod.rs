//! Per-file import/export registry.
//!
//! This module defines the core data structures produced by the declaration
//! extractor and consumed by the resolver, graph builder, and optimizer:
//! import/export declarations, identifier usage sets, and the registry that
//! stores one record per file.

pub mod types;

mod store;

pub use store::{FileRecord, ModuleRegistry};
pub use types::{
    ExportDeclaration, ExportKind, FileId, ImportDeclaration, ImportSpecifier, UsageSet,
};
