use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where the user can
/// act on it, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::BuiltinPattern { pattern, source } => format!("\
# Error: Invalid Built-in Pattern

`{pattern}` failed to compile: {source}

This is a bug in docxref, not in the documents.
"),
        Error::Io(err) => format!("\
# Error: I/O

{err}
"),
        Error::Json(err) => format!("\
# Error: JSON Serialization

{err}
"),
        Error::Pattern { identifier, source } => render_pattern(identifier, source),
        Error::ReadFailed { path, source } => render_read_failed(path, source),
        Error::TomlDe(err) => format!("\
# Error: Invalid {CONFIG_FILE}

{err}

## Fix

Known keys are `dir`, `extension`, `scan` (`line` or `attribute`)
and `self_link` (`file-name` or `declaring`).
"),
        Error::Watch { reason } => format!("\
# Error: Watch

{reason}
"),
        Error::WriteFailed { path, source } => render_write_failed(path, source),
    };
}

fn render_pattern(identifier: &str, source: &regex::Error) -> String {
    return format!("\
# Error: Identifier Too Large

Could not build a matcher for `{identifier}`: {source}

## Fix

Shorten the `id` attribute, or switch to `scan = \"attribute\"` in
`{CONFIG_FILE}` if the value spans several attributes.
");
}

fn render_read_failed(path: &Path, source: &std::io::Error) -> String {
    return format!("\
# Error: Read Failed

`{}` could not be read: {source}

No document has been rewritten yet.
", path.display());
}

fn render_write_failed(path: &Path, source: &std::io::Error) -> String {
    return format!("\
# Error: Write Failed

`{}` could not be written: {source}

Documents processed before this one were already rewritten. Fix the
permissions and run `docxref link` again; linked documents are left as they are.
", path.display());
}
