//! Per-file import optimization.
//!
//! Reconciles a file's declared imports against its actual identifier usage
//! to produce a minimal, deduplicated, deterministically ordered import
//! statement set, plus unused- and missing-import diagnostics. The
//! optimizer needs only one file's declarations and usage set, so it runs
//! independently per file.

use std::collections::HashSet;

use serde::Serialize;

use crate::registry::{ImportDeclaration, ImportSpecifier, UsageSet};

/// Ambient identifier names worth flagging when used without an import.
///
/// A fixed allow-list of well-known framework helpers, each mapped to its
/// canonical source. Anything outside this table is assumed intentionally
/// ambient or global and is never flagged.
pub const AMBIENT_NAMES: [(&str, &str); 5] = [
    ("useState", "react"),
    ("useEffect", "react"),
    ("useCallback", "react"),
    ("useMemo", "react"),
    ("useRef", "react"),
];

/// A named specifier retained in an import group.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NamedBinding {
    imported: String,
    local: String,
}

impl NamedBinding {
    /// Renders the specifier as it appears inside braces.
    fn render(&self) -> String {
        if self.imported == self.local {
            self.imported.clone()
        } else {
            format!("{} as {}", self.imported, self.local)
        }
    }
}

/// Working aggregate for all declarations sharing one source.
///
/// Transient: built and discarded within a single optimization call. Holds
/// at most one default binding, at most one namespace binding, and two
/// disjoint first-seen-ordered lists of named specifiers.
#[derive(Debug, Default)]
struct ImportGroup {
    source: String,
    default_binding: Option<String>,
    namespace_binding: Option<String>,
    value_named: Vec<NamedBinding>,
    type_named: Vec<NamedBinding>,
}

impl ImportGroup {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Self::default()
        }
    }

    fn binds(&self, local: &str) -> bool {
        self.default_binding.as_deref() == Some(local)
            || self.namespace_binding.as_deref() == Some(local)
            || self.value_named.iter().any(|b| b.local == local)
            || self.type_named.iter().any(|b| b.local == local)
    }

    fn has_value_bindings(&self) -> bool {
        self.default_binding.is_some()
            || self.namespace_binding.is_some()
            || !self.value_named.is_empty()
    }
}

/// A kept import statement in the optimized set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedImport {
    /// The source specifier the statement imports from.
    pub source: String,
    /// The rendered statement text.
    pub statement: String,
    /// Whether this is a type-only statement.
    pub is_type_only: bool,
}

/// A declared binding with no matching usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedImport {
    /// The local binding name.
    pub name: String,
    /// The source it was imported from.
    pub source: String,
    /// The declaration's line number.
    pub line: usize,
}

/// An identifier that looks used but has no matching import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingImport {
    /// The identifier name.
    pub name: String,
    /// The suggested canonical source.
    pub suggested_source: String,
}

/// The result of optimizing one file's imports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptimizedImports {
    /// The minimal ordered statement set to keep.
    pub kept: Vec<EmittedImport>,
    /// Declared-but-unused bindings, excluded from `kept`.
    pub unused: Vec<UnusedImport>,
    /// Best-effort missing-import candidates. Advisory only; nothing is
    /// ever inserted automatically.
    pub missing: Vec<MissingImport>,
}

impl OptimizedImports {
    /// Returns true when the optimizer found nothing to report.
    pub fn is_clean(&self) -> bool {
        self.unused.is_empty() && self.missing.is_empty()
    }
}

/// Reconciles declarations against usage for a single file.
///
/// # Example
///
/// ```rust
/// use modscope::optimize::optimize_imports;
/// use modscope::registry::{ImportDeclaration, ImportSpecifier, UsageSet};
///
/// let imports = vec![ImportDeclaration {
///     source: "react".to_string(),
///     specifiers: vec![ImportSpecifier::Named {
///         imported: "useState".to_string(),
///         local: "useState".to_string(),
///         is_type_only: false,
///     }],
///     is_type_only: false,
///     line: 1,
/// }];
///
/// let mut usage = UsageSet::new();
/// usage.values.insert("useState".to_string());
///
/// let result = optimize_imports(&imports, &usage);
/// assert_eq!(result.kept.len(), 1);
/// assert_eq!(result.kept[0].statement, "import { useState } from 'react';");
/// ```
pub fn optimize_imports(imports: &[ImportDeclaration], usage: &UsageSet) -> OptimizedImports {
    let mut groups: Vec<ImportGroup> = Vec::new();
    let mut unused: Vec<UnusedImport> = Vec::new();

    for declaration in imports {
        if declaration.is_malformed() {
            continue;
        }

        let group_idx = match groups.iter().position(|g| g.source == declaration.source) {
            Some(idx) => idx,
            None => {
                groups.push(ImportGroup::new(&declaration.source));
                groups.len() - 1
            }
        };
        let group = &mut groups[group_idx];

        for specifier in &declaration.specifiers {
            match specifier {
                ImportSpecifier::Default(local) => {
                    if usage.is_used(local) {
                        group.default_binding.get_or_insert_with(|| local.clone());
                    } else {
                        unused.push(UnusedImport {
                            name: local.clone(),
                            source: declaration.source.clone(),
                            line: declaration.line,
                        });
                    }
                }
                ImportSpecifier::Namespace(local) => {
                    if usage.is_used(local) {
                        group.namespace_binding.get_or_insert_with(|| local.clone());
                    } else {
                        unused.push(UnusedImport {
                            name: local.clone(),
                            source: declaration.source.clone(),
                            line: declaration.line,
                        });
                    }
                }
                ImportSpecifier::Named {
                    imported,
                    local,
                    is_type_only,
                } => {
                    if !usage.is_used(local) {
                        unused.push(UnusedImport {
                            name: local.clone(),
                            source: declaration.source.clone(),
                            line: declaration.line,
                        });
                        continue;
                    }
                    if group.binds(local) {
                        continue;
                    }

                    let binding = NamedBinding {
                        imported: imported.clone(),
                        local: local.clone(),
                    };

                    // A specifier is type-classified when its own flag or
                    // the declaration-level flag is set, or when the binding
                    // is referenced only in type positions. Value usage
                    // dominates the ambiguous case.
                    let is_type = *is_type_only
                        || declaration.is_type_only
                        || usage.used_as_type_only(local);
                    if is_type {
                        group.type_named.push(binding);
                    } else {
                        group.value_named.push(binding);
                    }
                }
            }
        }
    }

    let mut kept: Vec<EmittedImport> = Vec::new();
    for group in &groups {
        let has_types = !group.type_named.is_empty();
        let has_values = group.has_value_bindings();

        // Type and value specifiers never share a statement: mixing defeats
        // downstream tooling that special-cases type-only imports.
        if has_types {
            kept.push(render_type_import(group));
        }
        if has_values {
            kept.push(render_value_import(group));
        }
    }

    sort_statements(&mut kept);

    OptimizedImports {
        missing: find_missing_imports(usage, &groups),
        kept,
        unused,
    }
}

/// Renders the type-only statement for a group.
fn render_type_import(group: &ImportGroup) -> EmittedImport {
    let named = group
        .type_named
        .iter()
        .map(NamedBinding::render)
        .collect::<Vec<_>>()
        .join(", ");

    EmittedImport {
        source: group.source.clone(),
        statement: format!("import type {{ {} }} from '{}';", named, group.source),
        is_type_only: true,
    }
}

/// Renders the value statement for a group.
fn render_value_import(group: &ImportGroup) -> EmittedImport {
    let mut parts = Vec::new();

    if let Some(default) = &group.default_binding {
        parts.push(default.clone());
    }

    if !group.value_named.is_empty() {
        let named = group
            .value_named
            .iter()
            .map(NamedBinding::render)
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("{{ {} }}", named));
    }

    if let Some(namespace) = &group.namespace_binding {
        parts.push(format!("* as {}", namespace));
    }

    EmittedImport {
        source: group.source.clone(),
        statement: format!("import {} from '{}';", parts.join(", "), group.source),
        is_type_only: false,
    }
}

/// Orders statements: external sources (leading alphabetic character)
/// before relative ones, lexicographic by source within each band.
///
/// The ordering is independent of original declaration order, which is what
/// makes repeated runs byte-identical.
fn sort_statements(statements: &mut [EmittedImport]) {
    statements.sort_by(|a, b| {
        let a_external = starts_alphabetic(&a.source);
        let b_external = starts_alphabetic(&b.source);
        b_external
            .cmp(&a_external)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.is_type_only.cmp(&b.is_type_only).reverse())
    });
}

fn starts_alphabetic(source: &str) -> bool {
    source.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Flags ambient allow-list names used as values with no binding in any
/// group.
fn find_missing_imports(usage: &UsageSet, groups: &[ImportGroup]) -> Vec<MissingImport> {
    let bound: HashSet<&str> = groups
        .iter()
        .flat_map(|group| {
            group
                .default_binding
                .iter()
                .chain(group.namespace_binding.iter())
                .map(String::as_str)
                .chain(group.value_named.iter().map(|b| b.local.as_str()))
                .chain(group.type_named.iter().map(|b| b.local.as_str()))
        })
        .collect();

    AMBIENT_NAMES
        .iter()
        .filter(|(name, _)| usage.used_as_value(name) && !bound.contains(name))
        .map(|(name, source)| MissingImport {
            name: (*name).to_string(),
            suggested_source: (*source).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(imported: &str) -> ImportSpecifier {
        ImportSpecifier::Named {
            imported: imported.to_string(),
            local: imported.to_string(),
            is_type_only: false,
        }
    }

    fn named_type(imported: &str) -> ImportSpecifier {
        ImportSpecifier::Named {
            imported: imported.to_string(),
            local: imported.to_string(),
            is_type_only: true,
        }
    }

    fn decl(source: &str, specifiers: Vec<ImportSpecifier>) -> ImportDeclaration {
        ImportDeclaration {
            source: source.to_string(),
            specifiers,
            is_type_only: false,
            line: 1,
        }
    }

    fn usage_of(values: &[&str], types: &[&str]) -> UsageSet {
        UsageSet {
            values: values.iter().map(|s| s.to_string()).collect(),
            types: types.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_input() {
        let result = optimize_imports(&[], &UsageSet::new());
        assert!(result.kept.is_empty());
        assert!(result.unused.is_empty());
        assert!(result.missing.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_used_named_import_kept() {
        let imports = vec![decl("react", vec![named("useState")])];
        let usage = usage_of(&["useState"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].statement, "import { useState } from 'react';");
        assert!(!result.kept[0].is_type_only);
    }

    #[test]
    fn test_unused_default_import_dropped_and_reported() {
        let imports = vec![decl(
            "./helper",
            vec![ImportSpecifier::Default("Helper".to_string())],
        )];
        let result = optimize_imports(&imports, &UsageSet::new());

        assert!(result.kept.is_empty());
        assert_eq!(result.unused.len(), 1);
        assert_eq!(result.unused[0].name, "Helper");
        assert_eq!(result.unused[0].source, "./helper");
    }

    #[test]
    fn test_unused_namespace_import_dropped_and_reported() {
        let imports = vec![decl(
            "./utils",
            vec![ImportSpecifier::Namespace("utils".to_string())],
        )];
        let result = optimize_imports(&imports, &UsageSet::new());

        assert!(result.kept.is_empty());
        assert_eq!(result.unused.len(), 1);
        assert_eq!(result.unused[0].name, "utils");
    }

    #[test]
    fn test_unused_named_specifier_reported() {
        let imports = vec![decl("./math", vec![named("add"), named("subtract")])];
        let usage = usage_of(&["add"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].statement, "import { add } from './math';");
        assert_eq!(result.unused.len(), 1);
        assert_eq!(result.unused[0].name, "subtract");
    }

    #[test]
    fn test_type_value_split_into_two_statements() {
        // Foo used only as a type, Bar only as a value: two statements.
        let imports = vec![decl("./types", vec![named("Foo"), named("Bar")])];
        let usage = usage_of(&["Bar"], &["Foo"]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 2);
        assert_eq!(
            result.kept[0].statement,
            "import type { Foo } from './types';"
        );
        assert!(result.kept[0].is_type_only);
        assert_eq!(result.kept[1].statement, "import { Bar } from './types';");
        assert!(!result.kept[1].is_type_only);
    }

    #[test]
    fn test_explicit_type_specifier_stays_type() {
        let imports = vec![decl("./types", vec![named_type("Props")])];
        // Even referenced as a value elsewhere, the explicit flag wins.
        let usage = usage_of(&["Props"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 1);
        assert!(result.kept[0].is_type_only);
    }

    #[test]
    fn test_declaration_level_type_flag_applies_to_specifiers() {
        let mut declaration = decl("./types", vec![named("Config")]);
        declaration.is_type_only = true;
        let usage = usage_of(&[], &["Config"]);

        let result = optimize_imports(&[declaration], &usage);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(
            result.kept[0].statement,
            "import type { Config } from './types';"
        );
    }

    #[test]
    fn test_value_usage_dominates_ambiguous_binding() {
        let imports = vec![decl("./models", vec![named("User")])];
        // Present in both sets: classified as value, never surfaced as error.
        let usage = usage_of(&["User"], &["User"]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 1);
        assert!(!result.kept[0].is_type_only);
    }

    #[test]
    fn test_groups_merge_statements_with_same_source() {
        let imports = vec![
            decl("./math", vec![named("add")]),
            decl("./math", vec![named("subtract")]),
        ];
        let usage = usage_of(&["add", "subtract"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(
            result.kept[0].statement,
            "import { add, subtract } from './math';"
        );
    }

    #[test]
    fn test_duplicate_specifier_first_seen_wins() {
        let imports = vec![
            decl("./math", vec![named("add")]),
            decl("./math", vec![named("add")]),
        ];
        let usage = usage_of(&["add"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].statement, "import { add } from './math';");
    }

    #[test]
    fn test_default_and_named_in_one_statement() {
        let imports = vec![decl(
            "react",
            vec![
                ImportSpecifier::Default("React".to_string()),
                named("useState"),
            ],
        )];
        let usage = usage_of(&["React", "useState"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(
            result.kept[0].statement,
            "import React, { useState } from 'react';"
        );
    }

    #[test]
    fn test_namespace_rendering() {
        let imports = vec![decl(
            "./utils",
            vec![ImportSpecifier::Namespace("utils".to_string())],
        )];
        let usage = usage_of(&["utils"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(
            result.kept[0].statement,
            "import * as utils from './utils';"
        );
    }

    #[test]
    fn test_renamed_specifier_rendering() {
        let imports = vec![decl(
            "./math",
            vec![ImportSpecifier::Named {
                imported: "add".to_string(),
                local: "sum".to_string(),
                is_type_only: false,
            }],
        )];
        let usage = usage_of(&["sum"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(
            result.kept[0].statement,
            "import { add as sum } from './math';"
        );
    }

    #[test]
    fn test_external_sources_sort_before_relative() {
        let imports = vec![
            decl("./z", vec![named("z")]),
            decl("react", vec![named("useState")]),
            decl("./a", vec![named("a")]),
        ];
        let usage = usage_of(&["z", "useState", "a"], &[]);

        let result = optimize_imports(&imports, &usage);
        let sources: Vec<&str> = result.kept.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(sources, vec!["react", "./a", "./z"]);
    }

    #[test]
    fn test_idempotence() {
        let imports = vec![
            decl("./z", vec![named("z"), named("Zed")]),
            decl("react", vec![named("useState")]),
            decl("./a", vec![named("a")]),
        ];
        let usage = usage_of(&["z", "useState", "a"], &["Zed"]);

        let first = optimize_imports(&imports, &usage);
        let second = optimize_imports(&imports, &usage);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_import_heuristic() {
        let usage = usage_of(&["useState", "somethingElse"], &[]);
        let result = optimize_imports(&[], &usage);

        assert_eq!(result.missing.len(), 1);
        assert_eq!(result.missing[0].name, "useState");
        assert_eq!(result.missing[0].suggested_source, "react");
    }

    #[test]
    fn test_missing_not_flagged_when_bound() {
        let imports = vec![decl("react", vec![named("useState")])];
        let usage = usage_of(&["useState"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_missing_not_flagged_for_type_only_usage() {
        let usage = usage_of(&[], &["useState"]);
        let result = optimize_imports(&[], &usage);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_malformed_declaration_skipped() {
        let imports = vec![
            decl("", vec![named("ghost")]),
            decl("./real", vec![named("real")]),
        ];
        let usage = usage_of(&["ghost", "real"], &[]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].source, "./real");
    }

    #[test]
    fn test_mixed_group_emits_type_statement_first() {
        let imports = vec![decl(
            "./shapes",
            vec![named("Circle"), named("area")],
        )];
        let usage = usage_of(&["area"], &["Circle"]);

        let result = optimize_imports(&imports, &usage);
        assert_eq!(result.kept.len(), 2);
        assert!(result.kept[0].is_type_only);
        assert!(!result.kept[1].is_type_only);
        assert_eq!(result.kept[0].source, result.kept[1].source);
    }
}
