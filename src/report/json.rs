//! JSON report implementation.
//!
//! Emits the full analysis result in JSON format for machine-readable output.

use super::{ReportData, Reporter};
use serde::Serialize;
use std::io::{self, Write};

use crate::optimize::{EmittedImport, MissingImport, UnusedImport};

/// JSON reporter implementation.
pub struct JsonReporter;

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    total_files: usize,
    total_imports: usize,
    dependency_edges: usize,
    circular_dependencies: usize,
    files_with_findings: usize,
    skipped_files: usize,
}

/// Per-file optimizer output for JSON.
#[derive(Serialize)]
struct JsonFile {
    path: String,
    optimized_imports: Vec<EmittedImport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unused: Vec<UnusedImport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<MissingImport>,
}

/// Root JSON report structure.
#[derive(Serialize)]
struct JsonReport {
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    circular_dependencies: Vec<String>,
    files: Vec<JsonFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<String>,
}

impl Reporter for JsonReporter {
    fn write<W: Write>(&self, data: &ReportData, writer: &mut W) -> io::Result<()> {
        let files: Vec<JsonFile> = data
            .files
            .iter()
            .map(|(id, opt)| JsonFile {
                path: id.to_string(),
                optimized_imports: opt.kept.clone(),
                unused: opt.unused.clone(),
                missing: opt.missing.clone(),
            })
            .collect();

        let report = JsonReport {
            summary: JsonSummary {
                total_files: data.total_files,
                total_imports: data.total_imports,
                dependency_edges: data.total_edges,
                circular_dependencies: data.cycles.len(),
                files_with_findings: data.files_with_findings().count(),
                skipped_files: data.skipped.len(),
            },
            circular_dependencies: data.cycles.clone(),
            files,
            skipped: data.skipped.clone(),
        };

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
