//! Rewrite pass: wrap bounded mentions of collected identifiers in `<link>` markup.
//!
//! Documents are treated as opaque text. A mention qualifies when the
//! characters on both sides are neither a double quote nor an ASCII word
//! character, which keeps attribute values and already-linked `linkend`s out
//! of reach. Boundary characters are inspected, not consumed, so two mentions
//! separated by a single space are both wrapped in one pass. Wrapping an
//! already-linked mention produces doubled open and close tags; the collapse
//! step folds those back, so a second run settles on the same bytes as the first.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Error;
use crate::types::{Document, IdentifierSet, SelfLinkPolicy};

/// Substitution for one identifier record, in collection order.
struct LinkRule {
    /// The identifier text, used as both link target and link text.
    identifier: String,
    /// Literal match of the identifier; boundaries are checked per match.
    pattern: Regex,
    /// Documents that own the identifier and are never linked to it.
    skip_in: Vec<PathBuf>,
}

/// The rewrite pass, compiled once from the full identifier set and applied
/// to each document independently.
pub struct Linker {
    /// Folds a run of link-open tags into its last tag.
    open_runs: Regex,
    /// Folds a run of `</link>` into one.
    close_runs: Regex,
    /// One rule per identifier record.
    rules: Vec<LinkRule>,
}

impl Linker {
    /// Compile a rule for every non-empty identifier of `ids`.
    ///
    /// `dir` and `extension` locate the file-name owner of each identifier
    /// under [`SelfLinkPolicy::FileName`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` if an identifier cannot be compiled into a matcher.
    pub fn new(
        ids: &IdentifierSet,
        dir: &Path,
        extension: &str,
        policy: SelfLinkPolicy,
    ) -> Result<Self, Error> {
        let mut compiled: HashMap<&str, Regex> = HashMap::new();
        let mut rules = Vec::with_capacity(ids.len());

        for id in ids {
            if id.value.is_empty() {
                continue;
            }
            let cached = compiled.get(id.value.as_str()).cloned();
            let pattern = match cached {
                Some(existing) => existing,
                None => {
                    let built = literal(&id.value)?;
                    compiled.insert(id.value.as_str(), built.clone());
                    built
                },
            };
            let skip_in = match policy {
                SelfLinkPolicy::Declaring => {
                    ids.owners_of(&id.value).into_iter().map(Path::to_path_buf).collect()
                },
                SelfLinkPolicy::FileName => vec![dir.join(format!("{}.{extension}", id.value))],
            };
            rules.push(LinkRule { identifier: id.value.clone(), pattern, skip_in });
        }

        return Ok(Self {
            open_runs: builtin_pattern(r"(<link[^>]*>)+")?,
            close_runs: builtin_pattern(r"(?:</link>)+")?,
            rules,
        });
    }

    /// Rewrite one document against every rule, returning the new content.
    /// The document itself is untouched.
    pub fn rewrite(&self, doc: &Document) -> String {
        let mut buf = doc.content.clone();

        for rule in &self.rules {
            if rule.skip_in.iter().any(|owner| return owner == &doc.path) {
                tracing::debug!(path = %doc.path.display(), identifier = %rule.identifier, "skipping owner");
                continue;
            }
            if let Some(linked) = wrap_bounded_mentions(&buf, &rule.pattern, &rule.identifier) {
                buf = linked;
            }
            replace_in_place(&mut buf, &self.close_runs, "</link>");
            replace_in_place(&mut buf, &self.open_runs, "${1}");
        }

        return buf;
    }

    /// Number of compiled rules, duplicates included.
    pub fn rule_count(&self) -> usize {
        return self.rules.len();
    }
}

/// Whether `c` may sit next to a mention: anything but a quote or ASCII word character.
fn is_boundary(c: char) -> bool {
    return c != '"' && c != '_' && !c.is_ascii_alphanumeric();
}

/// Wrap every literal match of `pattern` that has a boundary character on
/// both sides. A mention at the very start or end of the text has no
/// boundary there and is left alone. Returns `None` when nothing qualified.
fn wrap_bounded_mentions(text: &str, pattern: &Regex, identifier: &str) -> Option<String> {
    let mut out = String::new();
    let mut copied = 0_usize;

    for m in pattern.find_iter(text) {
        let before = text.get(..m.start()).and_then(|s| return s.chars().next_back());
        let after = text.get(m.end()..).and_then(|s| return s.chars().next());
        if !(before.is_some_and(is_boundary) && after.is_some_and(is_boundary)) {
            continue;
        }
        out.push_str(text.get(copied..m.start()).unwrap_or_default());
        let _ = write!(out, r#"<link linkend="{identifier}">{}</link>"#, m.as_str());
        copied = m.end();
    }

    if copied == 0 {
        return None;
    }
    out.push_str(text.get(copied..).unwrap_or_default());
    return Some(out);
}

/// Escaped literal matcher for one identifier.
///
/// # Errors
///
/// Returns `Error::Pattern` if the pattern exceeds regex size limits.
fn literal(identifier: &str) -> Result<Regex, Error> {
    return Regex::new(&regex::escape(identifier)).map_err(|source| {
        return Error::Pattern { identifier: identifier.to_string(), source };
    });
}

/// Compile one of the crate's fixed patterns.
///
/// # Errors
///
/// Returns `Error::BuiltinPattern` naming the pattern source if it fails to compile.
pub fn builtin_pattern(source: &str) -> Result<Regex, Error> {
    return Regex::new(source).map_err(|err| {
        return Error::BuiltinPattern { pattern: source.to_string(), source: err };
    });
}

/// Apply `replace_all`, reallocating only when something matched.
fn replace_in_place(buf: &mut String, pattern: &Regex, replacement: &str) {
    if let Cow::Owned(replaced) = pattern.replace_all(buf, replacement) {
        *buf = replaced;
    }
}
