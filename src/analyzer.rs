//! Whole-project analysis pipeline.
//!
//! Runs the two-phase analysis: first every supported file is extracted
//! into a fresh registry, then the dependency graph, cycle list, and
//! per-file import optimizations are derived from that completed registry.
//! All state is owned by the run; repeated runs (e.g. in tests) never
//! interfere with each other.

use std::collections::BTreeMap;
use std::path::Path;

use walkdir::WalkDir;

use crate::extractor::{DeclarationExtractor, ExtractorResult, SourceLanguage};
use crate::graph::{find_cycles, Cycle, ModuleGraph};
use crate::optimize::{optimize_imports, OptimizedImports};
use crate::registry::{FileId, ModuleRegistry};

/// A per-file failure recorded during scanning.
///
/// Failures are isolated: one unreadable or unparseable file never aborts
/// the run, it just drops out of the registry.
#[derive(Debug, Clone)]
pub struct FileDiagnostic {
    /// The file that failed to scan.
    pub path: String,
    /// Human-readable failure description.
    pub message: String,
}

/// The complete result of one analysis run.
#[derive(Debug)]
pub struct ProjectAnalysis {
    /// The populated declaration registry.
    pub registry: ModuleRegistry,
    /// The derived dependency graph.
    pub graph: ModuleGraph,
    /// All distinct circular dependency chains.
    pub cycles: Vec<Cycle>,
    /// Per-file optimizer output, keyed by file.
    pub optimizations: BTreeMap<FileId, OptimizedImports>,
    /// Files that failed to scan.
    pub diagnostics: Vec<FileDiagnostic>,
}

impl ProjectAnalysis {
    /// Returns the number of files that produced findings (unused or
    /// missing imports).
    pub fn files_with_findings(&self) -> usize {
        self.optimizations
            .values()
            .filter(|opt| !opt.is_clean())
            .count()
    }
}

/// Analyzes every supported source file under `root`.
///
/// Phase one walks the tree and extracts declarations; phase two resolves
/// imports, builds the graph, detects cycles, and optimizes each file.
/// Phase two starts only after phase one has fully finished, since
/// resolution needs the complete file set.
pub fn analyze_project(root: &Path) -> ExtractorResult<ProjectAnalysis> {
    let mut extractor = DeclarationExtractor::new()?;
    let mut registry = ModuleRegistry::new();
    let mut diagnostics = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if SourceLanguage::from_extension(ext).is_none() {
            continue;
        }

        match extractor.extract_file(path) {
            Ok(record) => {
                let id = relative_id(root, path);
                registry.insert(id, record);
            }
            Err(e) => {
                eprintln!("Warning: skipping {}: {}", path.display(), e);
                diagnostics.push(FileDiagnostic {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    let mut analysis = analyze_registry(registry);
    analysis.diagnostics = diagnostics;
    Ok(analysis)
}

/// Runs the derivation phase over a pre-populated registry.
///
/// This is the filesystem-free entry point: tests and embedders can fill a
/// registry from any extraction source and still get the full graph,
/// cycle, and optimizer output.
pub fn analyze_registry(registry: ModuleRegistry) -> ProjectAnalysis {
    let graph = ModuleGraph::from_registry(&registry);
    let cycles = find_cycles(&graph);

    let optimizations: BTreeMap<FileId, OptimizedImports> = registry
        .iter()
        .map(|(id, record)| (id.clone(), optimize_imports(&record.imports, &record.usage)))
        .collect();

    ProjectAnalysis {
        registry,
        graph,
        cycles,
        optimizations,
        diagnostics: Vec::new(),
    }
}

/// Derives the registry identity for a path relative to the scan root.
fn relative_id(root: &Path, path: &Path) -> FileId {
    let relative = path.strip_prefix(root).unwrap_or(path);
    FileId::new(relative.to_string_lossy().into_owned())
}

/// Check if a directory should be ignored during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | ".next" | "coverage" | ".turbo"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FileRecord, ImportDeclaration, ImportSpecifier, UsageSet};

    fn import(source: &str, locals: &[&str]) -> ImportDeclaration {
        ImportDeclaration {
            source: source.to_string(),
            specifiers: locals
                .iter()
                .map(|l| ImportSpecifier::Named {
                    imported: l.to_string(),
                    local: l.to_string(),
                    is_type_only: false,
                })
                .collect(),
            is_type_only: false,
            line: 1,
        }
    }

    fn usage_of(values: &[&str]) -> UsageSet {
        UsageSet {
            values: values.iter().map(|s| s.to_string()).collect(),
            types: Default::default(),
        }
    }

    #[test]
    fn test_analyze_registry_empty() {
        let analysis = analyze_registry(ModuleRegistry::new());
        assert!(analysis.registry.is_empty());
        assert!(analysis.cycles.is_empty());
        assert!(analysis.optimizations.is_empty());
        assert_eq!(analysis.files_with_findings(), 0);
    }

    #[test]
    fn test_analyze_registry_finds_cycle() {
        let mut registry = ModuleRegistry::new();
        registry.insert(
            FileId::new("a.ts"),
            FileRecord::new(vec![import("./b", &["b"])], vec![], usage_of(&["b"])),
        );
        registry.insert(
            FileId::new("b.ts"),
            FileRecord::new(vec![import("./a", &["a"])], vec![], usage_of(&["a"])),
        );

        let analysis = analyze_registry(registry);
        assert_eq!(analysis.cycles.len(), 1);
        assert_eq!(analysis.cycles[0].path(), "a.ts -> b.ts -> a.ts");
    }

    #[test]
    fn test_analyze_registry_optimizes_every_file() {
        let mut registry = ModuleRegistry::new();
        registry.insert(
            FileId::new("a.ts"),
            FileRecord::new(vec![import("react", &["useState"])], vec![], usage_of(&[])),
        );
        registry.insert(FileId::new("b.ts"), FileRecord::default());

        let analysis = analyze_registry(registry);
        assert_eq!(analysis.optimizations.len(), 2);

        let a = analysis.optimizations.get(&FileId::new("a.ts")).unwrap();
        assert_eq!(a.unused.len(), 1);
        assert_eq!(analysis.files_with_findings(), 1);
    }

    #[test]
    fn test_isolated_file_is_graph_node() {
        let mut registry = ModuleRegistry::new();
        registry.insert(FileId::new("lonely.ts"), FileRecord::default());

        let analysis = analyze_registry(registry);
        assert!(analysis.graph.contains(&FileId::new("lonely.ts")));
        assert!(analysis.cycles.is_empty());
    }

    #[test]
    fn test_relative_id_strips_root() {
        let id = relative_id(Path::new("/proj"), Path::new("/proj/src/app.ts"));
        assert_eq!(id, FileId::new("src/app.ts"));
    }
}
