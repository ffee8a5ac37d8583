//! Shared types for import/export analysis.
//!
//! This module defines the declaration structures extracted from source
//! files and the canonical file identity used as the graph node key.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Canonical identity for a file in the analyzed project.
///
/// A `FileId` is a normalized, `/`-separated path relative to the project
/// root. Two different relative spellings that address the same file (e.g.
/// `./x` from one directory and `../dir/x` from another) normalize to the
/// same `FileId`, which is what makes it usable as the graph node key and
/// registry primary key.
///
/// # Example
///
/// ```rust
/// use modscope::registry::FileId;
///
/// let id = FileId::new("src\\components\\App.tsx");
/// assert_eq!(id.as_str(), "src/components/App.tsx");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Creates a file identity from a root-relative path.
    ///
    /// Backslashes are normalized to forward slashes and a leading `./`
    /// is stripped, so Windows-style and `./`-prefixed spellings produce
    /// the same identity.
    pub fn new(path: impl Into<String>) -> Self {
        let mut normalized = path.into().replace('\\', "/");
        while let Some(rest) = normalized.strip_prefix("./") {
            normalized = rest.to_string();
        }
        Self(normalized)
    }

    /// Returns the path string backing this identity.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the directory portion of the path (empty for root-level files).
    pub fn directory(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// An individual specifier within an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSpecifier {
    /// Default import: `import foo from 'module'`
    Default(String),
    /// Named import: `import { foo } from 'module'` or `import { foo as bar } from 'module'`
    Named {
        imported: String,
        local: String,
        is_type_only: bool,
    },
    /// Namespace import: `import * as foo from 'module'`
    Namespace(String),
}

impl ImportSpecifier {
    /// Returns the local binding name (the name used in the importing file).
    pub fn local_name(&self) -> &str {
        match self {
            ImportSpecifier::Default(name) => name,
            ImportSpecifier::Named { local, .. } => local,
            ImportSpecifier::Namespace(name) => name,
        }
    }

    /// Returns the imported name as seen by the source module.
    ///
    /// Default imports report `"default"` and namespace imports report `"*"`.
    pub fn imported_name(&self) -> &str {
        match self {
            ImportSpecifier::Default(_) => "default",
            ImportSpecifier::Named { imported, .. } => imported,
            ImportSpecifier::Namespace(_) => "*",
        }
    }

    /// Returns true for specifiers carrying their own `type` keyword.
    pub fn is_type_only(&self) -> bool {
        matches!(
            self,
            ImportSpecifier::Named {
                is_type_only: true,
                ..
            }
        )
    }
}

/// A single import declaration extracted from a source file.
///
/// Immutable once extracted; re-scanning a file replaces its whole registry
/// record rather than mutating declarations in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// The raw specifier string (e.g., "react", "./utils", "@scope/pkg").
    pub source: String,
    /// The specifiers bound by this declaration, in source order.
    pub specifiers: Vec<ImportSpecifier>,
    /// Whether the whole declaration is type-only (`import type ...`).
    pub is_type_only: bool,
    /// Line number in the source file (1-indexed), for diagnostics.
    pub line: usize,
}

impl ImportDeclaration {
    /// Returns true if this import targets a relative path (`./` or `../`).
    pub fn is_relative(&self) -> bool {
        self.source.starts_with("./") || self.source.starts_with("../")
    }

    /// Returns true if the declaration is missing required fields.
    ///
    /// Malformed declarations are skipped by consumers; the rest of the
    /// file's declarations still contribute.
    pub fn is_malformed(&self) -> bool {
        self.source.is_empty()
            || self
                .specifiers
                .iter()
                .any(|spec| spec.local_name().is_empty())
    }
}

/// The kind of export declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Named export: `export { a, b }` or `export const x = ...`
    Named,
    /// Default export: `export default ...`
    Default,
}

/// A single export declaration extracted from a source file.
///
/// Exports are recorded for re-export-aware resolution and reporting; the
/// graph and optimizer do not otherwise consume them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDeclaration {
    /// The kind of export.
    pub kind: ExportKind,
    /// The exported names (a default export records its bound name if any).
    pub names: Vec<String>,
    /// The module a re-export forwards from (`export { a } from './x'`).
    pub source: Option<String>,
    /// Line number in the source file (1-indexed).
    pub line: usize,
}

/// Identifier usage for a single file.
///
/// `values` holds names referenced outside import-declaration positions;
/// `types` holds names referenced in type positions. A name present in both
/// is treated as used as a value: value usage dominates, so
/// [`UsageSet::used_as_type_only`] is false for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageSet {
    /// Names referenced as runtime values.
    pub values: HashSet<String>,
    /// Names referenced in type positions.
    pub types: HashSet<String>,
}

impl UsageSet {
    /// Creates an empty usage set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the name is referenced anywhere, value or type.
    pub fn is_used(&self, name: &str) -> bool {
        self.values.contains(name) || self.types.contains(name)
    }

    /// Returns true if the name is referenced only in type positions.
    pub fn used_as_type_only(&self, name: &str) -> bool {
        self.types.contains(name) && !self.values.contains(name)
    }

    /// Returns true if the name is referenced as a value.
    pub fn used_as_value(&self, name: &str) -> bool {
        self.values.contains(name)
    }
}
