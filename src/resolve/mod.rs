//! Relative import specifier resolution.
//!
//! Maps a relative import specifier, in the context of an importing file,
//! to a file already present in the registry. Bare specifiers (library
//! names) are expected to be unresolved; that is not an error, they simply
//! never produce a graph edge.

use crate::registry::{FileId, ModuleRegistry};

/// Fixed suffix probe order for resolution.
///
/// The empty entry probes the bare path first; the `/index` variants come
/// last. The order is a static table so resolution is reproducible across
/// runs and platforms regardless of file-system iteration order. When more
/// than one candidate exists (e.g. both `x.ts` and `x/index.ts`), the first
/// match in this order wins; no ambiguity error is raised.
pub const PROBE_SUFFIXES: [&str; 9] = [
    "",
    ".ts",
    ".tsx",
    ".js",
    ".jsx",
    "/index.ts",
    "/index.tsx",
    "/index.js",
    "/index.jsx",
];

/// Resolves relative import specifiers against a completed registry.
///
/// # Example
///
/// ```rust
/// use modscope::registry::{FileId, FileRecord, ModuleRegistry};
/// use modscope::resolve::PathResolver;
///
/// let mut registry = ModuleRegistry::new();
/// registry.insert(FileId::new("src/utils.ts"), FileRecord::default());
///
/// let resolver = PathResolver::new(&registry);
/// let importer = FileId::new("src/app.ts");
///
/// let resolved = resolver.resolve(&importer, "./utils");
/// assert_eq!(resolved, Some(FileId::new("src/utils.ts")));
///
/// // Bare specifiers never resolve
/// assert_eq!(resolver.resolve(&importer, "react"), None);
/// ```
pub struct PathResolver<'a> {
    registry: &'a ModuleRegistry,
}

impl<'a> PathResolver<'a> {
    /// Creates a resolver over a fully populated registry.
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self { registry }
    }

    /// Resolves a specifier in the context of an importing file.
    ///
    /// Returns `None` for bare specifiers and for relative specifiers that
    /// match no registered file under any probe suffix.
    pub fn resolve(&self, importer: &FileId, specifier: &str) -> Option<FileId> {
        if !specifier.starts_with("./") && !specifier.starts_with("../") {
            return None;
        }

        let base = normalize_path(importer.directory(), specifier)?;

        for suffix in PROBE_SUFFIXES {
            let candidate = FileId::new(format!("{}{}", base, suffix));
            if self.registry.contains(&candidate) {
                return Some(candidate);
            }
        }

        None
    }
}

/// Joins a directory and a relative specifier, resolving `.` and `..`
/// components lexically.
///
/// Returns `None` if the specifier escapes above the project root.
fn normalize_path(directory: &str, specifier: &str) -> Option<String> {
    let mut components: Vec<&str> = if directory.is_empty() {
        Vec::new()
    } else {
        directory.split('/').collect()
    };

    for part in specifier.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                components.pop()?;
            }
            name => components.push(name),
        }
    }

    Some(components.join("/"))
}
