/// Crate-level error types for docxref diagnostics.
use std::path::PathBuf;

/// Every failure aborts the run. Variants that touch a document carry its
/// path so the diagnostic shows where the run stopped.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One of the crate's fixed patterns failed to compile.
    #[error("invalid built-in pattern `{pattern}`: {source}")]
    BuiltinPattern {
        /// Source text of the pattern.
        pattern: String,
        /// The regex compilation error.
        source: regex::Error,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of the identifier listing failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// An identifier could not be compiled into a matcher.
    #[error("cannot build matcher for identifier `{identifier}`: {source}")]
    Pattern {
        /// Identifier text that failed to compile.
        identifier: String,
        /// The regex compilation error.
        source: regex::Error,
    },

    /// A document exists but could not be read as text.
    #[error("read failed: {}: {source}", path.display())]
    ReadFailed {
        /// Document that could not be read.
        path: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },

    /// TOML deserialization of `.docxref.toml` failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The filesystem watcher could not be set up.
    #[error("watch: {reason}")]
    Watch {
        /// Description of the watcher failure.
        reason: String,
    },

    /// Rewritten content could not be written back to its document.
    #[error("write failed: {}: {source}", path.display())]
    WriteFailed {
        /// Document that could not be written.
        path: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },
}
