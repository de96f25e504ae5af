/// Core domain types for docxref documents and identifiers.
use std::path::{Path, PathBuf};

/// A file of the corpus with its raw text. Identity is the path.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw content, never parsed into a tree.
    pub content: String,
    /// Path as discovered under the corpus directory.
    pub path: PathBuf,
}

/// One `id` value found by the collection pass.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Identifier {
    /// Document the value was collected from.
    pub declared_in: PathBuf,
    /// The captured attribute value.
    pub value: String,
}

/// Ordered identifiers of the whole corpus, in collection order.
/// Duplicates are kept: the rewriter processes every record.
#[derive(Debug, Clone, Default)]
pub struct IdentifierSet {
    /// Records in the order documents and lines were scanned.
    entries: Vec<Identifier>,
}

impl IdentifierSet {
    /// Build a set from records already in collection order.
    pub fn new(entries: Vec<Identifier>) -> Self {
        return Self { entries };
    }

    /// Whether the collection pass found nothing.
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    /// Iterate records in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Identifier> {
        return self.entries.iter();
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    /// Paths of every document that declared `value`.
    pub fn owners_of(&self, value: &str) -> Vec<&Path> {
        return self
            .entries
            .iter()
            .filter(|e| return e.value == value)
            .map(|e| return e.declared_in.as_path())
            .collect();
    }
}

impl<'a> IntoIterator for &'a IdentifierSet {
    type IntoIter = std::slice::Iter<'a, Identifier>;
    type Item = &'a Identifier;

    fn into_iter(self) -> Self::IntoIter {
        return self.iter();
    }
}

/// How the collection pass extracts `id` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    /// One `id="..."` or `xml:id="..."` attribute per identifier.
    Attribute,
    /// Greedy per-line capture from the last `id="` to the last quote.
    #[default]
    Line,
}

/// How the rewriter decides a document owns an identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfLinkPolicy {
    /// Skip documents the identifier was collected from.
    Declaring,
    /// Skip the document named `<identifier>.<extension>`.
    #[default]
    FileName,
}
