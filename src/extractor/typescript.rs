//! Tree-sitter based declaration extraction.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

use crate::registry::{
    ExportDeclaration, ExportKind, FileRecord, ImportDeclaration, ImportSpecifier,
};

/// Errors that can occur during declaration extraction.
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse file: {path}")]
    ParseError { path: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Tree-sitter language initialization failed")]
    LanguageInit,
}

/// Result type for extraction operations.
pub type ExtractorResult<T> = Result<T, ExtractorError>;

/// Language type for file analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
    Jsx,
}

impl SourceLanguage {
    /// Determine language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }
}

/// Extractor for imports, exports, and identifier usage.
///
/// Holds one configured parser per grammar; reusable across files.
pub struct DeclarationExtractor {
    js_parser: Parser,
    ts_parser: Parser,
    tsx_parser: Parser,
}

impl DeclarationExtractor {
    /// Creates a new extractor with all grammars initialized.
    pub fn new() -> ExtractorResult<Self> {
        let mut js_parser = Parser::new();
        js_parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|_| ExtractorError::LanguageInit)?;

        let mut ts_parser = Parser::new();
        ts_parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|_| ExtractorError::LanguageInit)?;

        let mut tsx_parser = Parser::new();
        tsx_parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .map_err(|_| ExtractorError::LanguageInit)?;

        Ok(Self {
            js_parser,
            ts_parser,
            tsx_parser,
        })
    }

    /// Extracts declarations and usage from a file on disk.
    pub fn extract_file(&mut self, path: &Path) -> ExtractorResult<FileRecord> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let language = SourceLanguage::from_extension(ext)
            .ok_or_else(|| ExtractorError::UnsupportedFileType(ext.to_string()))?;

        let content = fs::read_to_string(path)?;
        self.extract_source(&content, language).map_err(|_| {
            ExtractorError::ParseError {
                path: path.display().to_string(),
            }
        })
    }

    /// Extracts declarations and usage from source text.
    pub fn extract_source(
        &mut self,
        source: &str,
        language: SourceLanguage,
    ) -> ExtractorResult<FileRecord> {
        let parser = match language {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => &mut self.js_parser,
            SourceLanguage::TypeScript => &mut self.ts_parser,
            SourceLanguage::Tsx => &mut self.tsx_parser,
        };

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ExtractorError::ParseError {
                path: String::from("<source>"),
            })?;

        Ok(self.extract_tree(&tree, source))
    }

    /// Walks a parsed tree, collecting declarations and usage in one pass.
    fn extract_tree(&self, tree: &Tree, source: &str) -> FileRecord {
        let mut record = FileRecord::default();
        self.visit_node(tree.root_node(), source, &mut record);
        record
    }

    fn visit_node(&self, node: Node, source: &str, record: &mut FileRecord) {
        match node.kind() {
            "import_statement" => {
                if let Some(import) = self.parse_import(&node, source) {
                    record.imports.push(import);
                }
                // Import clauses define bindings rather than referencing
                // them; nothing below this node counts as usage.
                return;
            }
            "export_statement" => {
                if let Some(export) = self.parse_export(&node, source) {
                    record.exports.push(export);
                }
                // Fall through: identifiers inside an export statement are
                // real references (e.g. `export { helper };`).
            }
            "identifier" | "shorthand_property_identifier" => {
                if let Some(name) = self.node_text(&node, source) {
                    record.usage.values.insert(name.to_string());
                }
            }
            "type_identifier" => {
                if let Some(name) = self.node_text(&node, source) {
                    record.usage.types.insert(name.to_string());
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit_node(child, source, record);
        }
    }

    /// Parses an ES module import statement.
    fn parse_import(&self, node: &Node, source: &str) -> Option<ImportDeclaration> {
        let mut source_module = String::new();
        let mut specifiers = Vec::new();
        let mut is_type_only = false;
        let line = node.start_position().row + 1;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                // `import type { ... } from ...`
                "type" => is_type_only = true,
                "string" => {
                    source_module = self.string_value(&child, source)?;
                }
                "import_clause" => {
                    self.parse_import_clause(&child, source, &mut specifiers);
                }
                _ => {}
            }
        }

        if source_module.is_empty() {
            return None;
        }

        Some(ImportDeclaration {
            source: source_module,
            specifiers,
            is_type_only,
            line,
        })
    }

    /// Parses the clause between `import` and `from`.
    fn parse_import_clause(&self, node: &Node, source: &str, specifiers: &mut Vec<ImportSpecifier>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "identifier" => {
                    if let Some(name) = self.node_text(&child, source) {
                        specifiers.push(ImportSpecifier::Default(name.to_string()));
                    }
                }
                "namespace_import" => {
                    if let Some(name) = self.first_identifier(&child, source) {
                        specifiers.push(ImportSpecifier::Namespace(name));
                    }
                }
                "named_imports" => {
                    self.parse_named_imports(&child, source, specifiers);
                }
                _ => {}
            }
        }
    }

    /// Parses named imports: `{ foo, bar as baz, type Qux }`.
    fn parse_named_imports(&self, node: &Node, source: &str, specifiers: &mut Vec<ImportSpecifier>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "import_specifier" {
                continue;
            }

            let Some(imported) = child
                .child_by_field_name("name")
                .and_then(|n| self.node_text(&n, source))
            else {
                continue;
            };

            let local = child
                .child_by_field_name("alias")
                .and_then(|n| self.node_text(&n, source))
                .unwrap_or(imported);

            let is_type_only = self.has_type_keyword(&child);

            specifiers.push(ImportSpecifier::Named {
                imported: imported.to_string(),
                local: local.to_string(),
                is_type_only,
            });
        }
    }

    /// Parses an export statement into its declaration record.
    fn parse_export(&self, node: &Node, source: &str) -> Option<ExportDeclaration> {
        let line = node.start_position().row + 1;
        let mut kind = ExportKind::Named;
        let mut names = Vec::new();

        let re_export_source = node
            .child_by_field_name("source")
            .and_then(|n| self.string_value(&n, source));

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "default" => kind = ExportKind::Default,
                "export_clause" => {
                    self.collect_export_clause_names(&child, source, &mut names);
                }
                "*" => names.push("*".to_string()),
                _ => {}
            }
        }

        if let Some(declaration) = node.child_by_field_name("declaration") {
            self.collect_declaration_names(&declaration, source, &mut names);
        } else if kind == ExportKind::Default {
            // `export default someIdentifier` records the identifier name.
            if let Some(value) = node.child_by_field_name("value") {
                if value.kind() == "identifier" {
                    if let Some(name) = self.node_text(&value, source) {
                        names.push(name.to_string());
                    }
                }
            }
        }

        Some(ExportDeclaration {
            kind,
            names,
            source: re_export_source,
            line,
        })
    }

    /// Collects exported names from `export { a, b as c }`.
    fn collect_export_clause_names(&self, node: &Node, source: &str, names: &mut Vec<String>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "export_specifier" {
                continue;
            }
            let exported = child
                .child_by_field_name("alias")
                .or_else(|| child.child_by_field_name("name"))
                .and_then(|n| self.node_text(&n, source));
            if let Some(name) = exported {
                names.push(name.to_string());
            }
        }
    }

    /// Collects the names bound by an exported declaration.
    fn collect_declaration_names(&self, node: &Node, source: &str, names: &mut Vec<String>) {
        // Functions, classes, interfaces, type aliases, and enums carry a
        // `name` field directly.
        if let Some(name_node) = node.child_by_field_name("name") {
            if let Some(name) = self.node_text(&name_node, source) {
                names.push(name.to_string());
                return;
            }
        }

        // Variable declarations may bind several declarators.
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "variable_declarator" {
                if let Some(name) = child
                    .child_by_field_name("name")
                    .and_then(|n| self.node_text(&n, source))
                {
                    names.push(name.to_string());
                }
            }
        }
    }

    /// Returns true if the node carries a `type` keyword child.
    fn has_type_keyword(&self, node: &Node) -> bool {
        let mut cursor = node.walk();
        let has_type = node.children(&mut cursor).any(|child| {
            child.kind() == "type" && !child.is_named()
        });
        has_type
    }

    /// Finds the local name in a namespace import (`* as NAME`).
    fn first_identifier(&self, node: &Node, source: &str) -> Option<String> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "identifier" {
                return self.node_text(&child, source).map(|s| s.to_string());
            }
        }
        None
    }

    /// Extracts the text content of a node.
    fn node_text<'a>(&self, node: &Node, source: &'a str) -> Option<&'a str> {
        source.get(node.start_byte()..node.end_byte())
    }

    /// Extracts a string literal's value (removes quotes).
    fn string_value(&self, node: &Node, source: &str) -> Option<String> {
        let text = self.node_text(node, source)?;
        let trimmed = text
            .trim_start_matches(['"', '\'', '`'])
            .trim_end_matches(['"', '\'', '`']);
        Some(trimmed.to_string())
    }
}
