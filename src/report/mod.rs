//! Report assembly for analysis results.
//!
//! Renders a completed [`ProjectAnalysis`] as Markdown (documentation and
//! review) or JSON (machine-readable output).
//!
//! [`ProjectAnalysis`]: crate::analyzer::ProjectAnalysis

pub mod json;
pub mod markdown;

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::analyzer::ProjectAnalysis;
use crate::optimize::OptimizedImports;
use crate::registry::FileId;

/// Report format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!(
                "Unknown report format: '{}'. Valid formats: json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Data container for report generation.
#[derive(Debug)]
pub struct ReportData {
    /// Number of files scanned into the registry.
    pub total_files: usize,
    /// Total import declarations across all files.
    pub total_imports: usize,
    /// Dependency edges in the graph.
    pub total_edges: usize,
    /// Rendered cycle paths.
    pub cycles: Vec<String>,
    /// Per-file optimizer results.
    pub files: BTreeMap<FileId, OptimizedImports>,
    /// Scan failures.
    pub skipped: Vec<String>,
}

impl ReportData {
    /// Assembles report data from a completed analysis.
    pub fn from_analysis(analysis: &ProjectAnalysis) -> Self {
        Self {
            total_files: analysis.registry.len(),
            total_imports: analysis.registry.total_imports(),
            total_edges: analysis.graph.edge_count(),
            cycles: analysis.cycles.iter().map(|c| c.path()).collect(),
            files: analysis.optimizations.clone(),
            skipped: analysis
                .diagnostics
                .iter()
                .map(|d| format!("{}: {}", d.path, d.message))
                .collect(),
        }
    }

    /// Files with at least one unused or missing finding, in path order.
    pub fn files_with_findings(&self) -> impl Iterator<Item = (&FileId, &OptimizedImports)> {
        self.files.iter().filter(|(_, opt)| !opt.is_clean())
    }
}

/// Trait for report writers.
pub trait Reporter {
    /// Write the report to the given writer.
    fn write<W: Write>(&self, data: &ReportData, writer: &mut W) -> io::Result<()>;
}

/// Writes a report in the specified format.
pub fn write_report<W: Write>(
    format: ReportFormat,
    data: &ReportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ReportFormat::Json => json::JsonReporter.write(data, writer),
        ReportFormat::Markdown => markdown::MarkdownReporter.write(data, writer),
    }
}

/// Renders a report to a string.
pub fn report_to_string(format: ReportFormat, data: &ReportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_report(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
