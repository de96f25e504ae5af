//! Corpus discovery: the documents directly inside the target directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Error;
use crate::types::Document;

/// List the documents of `dir` with the given extension, sorted by file name.
/// Subdirectories are not descended into. A missing directory is an empty corpus.
pub fn discover(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "corpus directory does not exist");
        return Vec::new();
    }

    return WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file())
        .filter(|e| return e.path().extension().is_some_and(|ext| return ext == extension))
        .map(walkdir::DirEntry::into_path)
        .collect();
}

/// Discover and read every document of the corpus.
///
/// # Errors
///
/// Returns `Error::ReadFailed` for the first document that cannot be read as text.
pub fn load(dir: &Path, extension: &str) -> Result<Vec<Document>, Error> {
    let paths = discover(dir, extension);
    let mut documents = Vec::with_capacity(paths.len());

    for path in paths {
        let content = std::fs::read_to_string(&path)
            .map_err(|source| return Error::ReadFailed { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "loaded document");
        documents.push(Document { content, path });
    }

    tracing::info!(dir = %dir.display(), documents = documents.len(), "loaded corpus");
    return Ok(documents);
}

/// Write rewritten content back over a document, truncating it.
///
/// # Errors
///
/// Returns `Error::WriteFailed` if the file cannot be written.
pub fn persist(path: &Path, content: &str) -> Result<(), Error> {
    return std::fs::write(path, content)
        .map_err(|source| return Error::WriteFailed { path: path.to_path_buf(), source });
}
