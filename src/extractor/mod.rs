//! Declaration extraction from JavaScript/TypeScript sources.
//!
//! This module turns one file's text into the structured inputs the core
//! engine consumes: an ordered import declaration list, an ordered export
//! declaration list, and the identifier usage set. The core never parses
//! text itself; it depends only on the extracted [`FileRecord`]s.
//!
//! # Example
//!
//! ```ignore
//! use modscope::extractor::{DeclarationExtractor, SourceLanguage};
//!
//! let mut extractor = DeclarationExtractor::new()?;
//! let record = extractor.extract_source(
//!     "import { useState } from 'react';",
//!     SourceLanguage::TypeScript,
//! )?;
//! assert_eq!(record.imports.len(), 1);
//! ```
//!
//! [`FileRecord`]: crate::registry::FileRecord

pub mod typescript;

pub use typescript::{DeclarationExtractor, ExtractorError, ExtractorResult, SourceLanguage};
