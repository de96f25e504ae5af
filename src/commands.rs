//! Core CLI commands for docxref: link, check, ids.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::collector::Collector;
use crate::config::Config;
use crate::corpus;
use crate::error;
use crate::rewriter::Linker;
use crate::types::{Document, Identifier, IdentifierSet};

/// Both passes' inputs, with pass 1 finished before the linker exists.
struct Prepared {
    /// Every document of the corpus, as read.
    documents: Vec<Document>,
    /// The full identifier set from the collection pass.
    ids: IdentifierSet,
    /// The rewrite pass compiled from `ids`.
    linker: Linker,
}

/// Load config, read the corpus, run the collection pass, compile the linker.
///
/// # Errors
///
/// Returns errors from config loading, document reading, or matcher compilation.
fn prepare(root: &Path, dir: Option<&Path>) -> Result<Prepared, error::Error> {
    let mut config = Config::load(root)?;
    if let Some(dir) = dir {
        config.dir = dir.to_path_buf();
    }
    let corpus_dir = config.corpus_dir(root);

    let documents = corpus::load(&corpus_dir, &config.extension)?;
    let ids = Collector::new(config.scan)?.collect(&documents);
    if ids.is_empty() && !documents.is_empty() {
        tracing::warn!(dir = %corpus_dir.display(), "no identifiers declared in corpus");
    }
    let linker = Linker::new(&ids, &corpus_dir, &config.extension, config.self_link)?;
    tracing::info!(rules = linker.rule_count(), policy = ?config.self_link, "linker ready");

    return Ok(Prepared { documents, ids, linker });
}

/// Report documents a `link` run would change, writing nothing.
/// Exits 1 when any document is not yet linked, 0 otherwise.
///
/// # Errors
///
/// Returns errors from config loading, document reading, or matcher compilation.
pub fn check(dir: Option<&Path>) -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let prepared = prepare(&root, dir)?;

    let mut stale = 0_usize;
    for doc in &prepared.documents {
        if prepared.linker.rewrite(doc) != doc.content {
            println!("STALE   {}", doc.path.display());
            stale = stale.saturating_add(1);
        }
    }

    if stale > 0 {
        println!();
        println!("{stale} stale");
        eprintln!("hint: run `docxref link` to insert the missing links");
        return Ok(ExitCode::from(1));
    }

    let total = prepared.documents.len();
    println!("All {total} documents linked");
    return Ok(ExitCode::SUCCESS);
}

/// Print the collected identifiers in collection order.
///
/// # Errors
///
/// Returns errors from collection, or `Error::Json` if serialization fails.
pub fn ids(dir: Option<&Path>, json: bool) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let prepared = prepare(&root, dir)?;

    if json {
        let listing: Vec<&Identifier> = prepared.ids.iter().collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for id in &prepared.ids {
        println!("{}\t{}", id.value, id.declared_in.display());
    }
    return Ok(());
}

/// Collect identifiers, then rewrite every document in place.
/// Documents already at their linked form are left untouched on disk.
///
/// # Errors
///
/// Returns the first read, compile, or write failure. Documents written
/// before the failure stay written.
pub fn link(dir: Option<&Path>) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let prepared = prepare(&root, dir)?;

    let mut changed = 0_usize;
    for doc in &prepared.documents {
        let rewritten = prepared.linker.rewrite(doc);
        if rewritten == doc.content {
            tracing::debug!(path = %doc.path.display(), "unchanged");
            continue;
        }
        corpus::persist(&doc.path, &rewritten)?;
        tracing::debug!(path = %doc.path.display(), "rewrote");
        changed = changed.saturating_add(1);
    }

    let total = prepared.documents.len();
    let count = prepared.ids.len();
    eprintln!("Linked {changed} of {total} documents ({count} identifiers)");

    return Ok(());
}
