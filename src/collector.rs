//! Collection pass: gather every declared `id` value of the corpus.

use regex::Regex;

use crate::error::Error;
use crate::rewriter::builtin_pattern;
use crate::types::{Document, Identifier, IdentifierSet, ScanMode};

/// Default capture. `.` stops at line breaks, so this yields at most one
/// value per line: from the last `id="` to the last quote of that line.
const LINE_PATTERN: &str = r#".*id="(.*)".*"#;

/// One attribute at a time, stopping at the first closing quote.
const ATTRIBUTE_PATTERN: &str = r#"(?:^|\s)(?:xml:)?id="([^"]*)""#;

/// Compiled extraction pattern for one scan mode.
pub struct Collector {
    /// Mode the pattern was built for.
    mode: ScanMode,
    /// Pattern whose first group is the identifier.
    pattern: Regex,
}

impl Collector {
    /// Compile the extraction pattern for `mode`.
    ///
    /// # Errors
    ///
    /// Returns `Error::BuiltinPattern` if the extraction pattern fails to compile.
    pub fn new(mode: ScanMode) -> Result<Self, Error> {
        let source = match mode {
            ScanMode::Attribute => ATTRIBUTE_PATTERN,
            ScanMode::Line => LINE_PATTERN,
        };
        let pattern = builtin_pattern(source)?;
        return Ok(Self { mode, pattern });
    }

    /// Run the collection pass over the whole corpus.
    /// Documents are visited in order, so the set is deterministic.
    pub fn collect(&self, documents: &[Document]) -> IdentifierSet {
        let mut entries = Vec::new();
        for doc in documents {
            let before = entries.len();
            self.collect_from_document(doc, &mut entries);
            tracing::debug!(
                path = %doc.path.display(),
                found = entries.len().saturating_sub(before),
                "collected identifiers"
            );
        }
        tracing::info!(identifiers = entries.len(), mode = ?self.mode, "collection pass complete");
        return IdentifierSet::new(entries);
    }

    /// Append the identifiers declared by one document.
    fn collect_from_document(&self, doc: &Document, entries: &mut Vec<Identifier>) {
        for cap in self.pattern.captures_iter(&doc.content) {
            let Some(value) = cap.get(1) else { continue };
            if self.mode == ScanMode::Attribute && value.is_empty() {
                continue;
            }
            entries.push(Identifier {
                declared_in: doc.path.clone(),
                value: value.as_str().to_string(),
            });
        }
    }
}
