//! The per-file declaration store.

use std::collections::BTreeMap;

use super::types::{ExportDeclaration, FileId, ImportDeclaration, UsageSet};

/// Everything extracted from a single file in one scan.
#[derive(Debug, Clone, Default)]
pub struct FileRecord {
    /// Import declarations in source order.
    pub imports: Vec<ImportDeclaration>,
    /// Export declarations in source order.
    pub exports: Vec<ExportDeclaration>,
    /// Identifier usage outside import positions.
    pub usage: UsageSet,
}

impl FileRecord {
    /// Creates a record from the extractor's three outputs.
    pub fn new(
        imports: Vec<ImportDeclaration>,
        exports: Vec<ExportDeclaration>,
        usage: UsageSet,
    ) -> Self {
        Self {
            imports,
            exports,
            usage,
        }
    }
}

/// Stores the extracted declaration lists for every scanned file.
///
/// Entries are created once per scan and never mutated; re-scanning a file
/// replaces its record wholesale. Backed by a `BTreeMap` so iteration order
/// is deterministic across runs, which the resolver and reports rely on.
///
/// # Example
///
/// ```rust
/// use modscope::registry::{FileId, FileRecord, ModuleRegistry};
///
/// let mut registry = ModuleRegistry::new();
/// registry.insert(FileId::new("src/app.ts"), FileRecord::default());
/// assert!(registry.contains(&FileId::new("src/app.ts")));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    files: BTreeMap<FileId, FileRecord>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for a file.
    pub fn insert(&mut self, id: FileId, record: FileRecord) {
        self.files.insert(id, record);
    }

    /// Looks up the record for a file.
    pub fn get(&self, id: &FileId) -> Option<&FileRecord> {
        self.files.get(id)
    }

    /// Returns true if the file has been registered.
    pub fn contains(&self, id: &FileId) -> bool {
        self.files.contains_key(id)
    }

    /// Iterates over all records in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&FileId, &FileRecord)> {
        self.files.iter()
    }

    /// Iterates over all registered file identities in path order.
    pub fn file_ids(&self) -> impl Iterator<Item = &FileId> {
        self.files.keys()
    }

    /// Returns the number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no files have been registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the total number of import declarations across all files.
    pub fn total_imports(&self) -> usize {
        self.files.values().map(|r| r.imports.len()).sum()
    }
}
