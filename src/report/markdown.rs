//! Markdown report implementation.
//!
//! Emits the analysis result as a Markdown document for review and
//! documentation.

use super::{ReportData, Reporter};
use std::io::{self, Write};

/// Markdown reporter implementation.
pub struct MarkdownReporter;

impl Reporter for MarkdownReporter {
    fn write<W: Write>(&self, data: &ReportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Import Analysis Report")?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Total Files | {} |", data.total_files)?;
        writeln!(writer, "| Total Imports | {} |", data.total_imports)?;
        writeln!(writer, "| Dependency Edges | {} |", data.total_edges)?;
        writeln!(writer, "| Circular Dependencies | {} |", data.cycles.len())?;
        writeln!(writer, "| Skipped Files | {} |", data.skipped.len())?;
        writeln!(writer)?;

        // Circular dependencies
        if !data.cycles.is_empty() {
            writeln!(writer, "## Circular Dependencies")?;
            writeln!(writer)?;
            for (i, cycle) in data.cycles.iter().enumerate() {
                writeln!(writer, "{}. `{}`", i + 1, cycle)?;
            }
            writeln!(writer)?;
        }

        // Per-file recommendations
        let findings: Vec<_> = data.files_with_findings().collect();
        if !findings.is_empty() {
            writeln!(writer, "## Recommendations")?;
            writeln!(writer)?;

            for (id, opt) in findings {
                writeln!(writer, "### {}", id)?;
                writeln!(writer)?;

                if !opt.unused.is_empty() {
                    let names: Vec<&str> =
                        opt.unused.iter().map(|u| u.name.as_str()).collect();
                    writeln!(writer, "- Remove unused imports: {}", names.join(", "))?;
                }
                if !opt.missing.is_empty() {
                    let suggestions: Vec<String> = opt
                        .missing
                        .iter()
                        .map(|m| format!("{} from '{}'", m.name, m.suggested_source))
                        .collect();
                    writeln!(writer, "- Add missing imports: {}", suggestions.join(", "))?;
                }

                if !opt.kept.is_empty() {
                    writeln!(writer)?;
                    writeln!(writer, "Optimized import block:")?;
                    writeln!(writer)?;
                    writeln!(writer, "```ts")?;
                    for statement in &opt.kept {
                        writeln!(writer, "{}", statement.statement)?;
                    }
                    writeln!(writer, "```")?;
                }
                writeln!(writer)?;
            }
        }

        // Skipped files
        if !data.skipped.is_empty() {
            writeln!(writer, "## Skipped Files")?;
            writeln!(writer)?;
            for skipped in &data.skipped {
                writeln!(writer, "- {}", skipped)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_registry;
    use crate::registry::{
        FileId, FileRecord, ImportDeclaration, ImportSpecifier, ModuleRegistry, UsageSet,
    };
    use crate::report::report_to_string;
    use crate::report::ReportFormat;

    fn registry_with_unused() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.insert(
            FileId::new("src/app.ts"),
            FileRecord::new(
                vec![ImportDeclaration {
                    source: "./helper".to_string(),
                    specifiers: vec![ImportSpecifier::Default("Helper".to_string())],
                    is_type_only: false,
                    line: 3,
                }],
                vec![],
                UsageSet::new(),
            ),
        );
        registry
    }

    #[test]
    fn test_markdown_contains_summary() {
        let analysis = analyze_registry(registry_with_unused());
        let data = ReportData::from_analysis(&analysis);

        let output = report_to_string(ReportFormat::Markdown, &data).unwrap();
        assert!(output.contains("# Import Analysis Report"));
        assert!(output.contains("| Total Files | 1 |"));
    }

    #[test]
    fn test_markdown_lists_unused_imports() {
        let analysis = analyze_registry(registry_with_unused());
        let data = ReportData::from_analysis(&analysis);

        let output = report_to_string(ReportFormat::Markdown, &data).unwrap();
        assert!(output.contains("### src/app.ts"));
        assert!(output.contains("Remove unused imports: Helper"));
    }

    #[test]
    fn test_markdown_omits_empty_sections() {
        let analysis = analyze_registry(ModuleRegistry::new());
        let data = ReportData::from_analysis(&analysis);

        let output = report_to_string(ReportFormat::Markdown, &data).unwrap();
        assert!(!output.contains("## Circular Dependencies"));
        assert!(!output.contains("## Recommendations"));
        assert!(!output.contains("## Skipped Files"));
    }

    #[test]
    fn test_markdown_renders_cycles() {
        let mut registry = ModuleRegistry::new();
        for (file, target) in [("a.ts", "./b"), ("b.ts", "./a")] {
            registry.insert(
                FileId::new(file),
                FileRecord::new(
                    vec![ImportDeclaration {
                        source: target.to_string(),
                        specifiers: vec![],
                        is_type_only: false,
                        line: 1,
                    }],
                    vec![],
                    UsageSet::new(),
                ),
            );
        }

        let analysis = analyze_registry(registry);
        let data = ReportData::from_analysis(&analysis);

        let output = report_to_string(ReportFormat::Markdown, &data).unwrap();
        assert!(output.contains("## Circular Dependencies"));
        assert!(output.contains("`a.ts -> b.ts -> a.ts`"));
    }
}
