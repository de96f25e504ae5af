//! File watcher: runs `link` on startup, then re-runs on corpus changes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::config::Config;
use crate::diagnostics;
use crate::error;

/// Debounce delay between filesystem events and re-link.
const DEBOUNCE_MS: u64 = 100;

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns `Error::Watch` if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return error::Error::Watch {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// Entry point for the watch command.
///
/// Links once, then watches the corpus directory and re-links on changes.
/// Re-linking a settled corpus writes nothing, so the tool's own writes
/// trigger at most one extra round.
///
/// # Errors
///
/// Returns errors from config loading or watcher setup.
pub fn run(dir: Option<&Path>) -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let corpus_dir = dir.map_or_else(|| return config.corpus_dir(&root), |d| return root.join(d));

    eprintln!("watch: initial link");
    let mut last_code = run_link(dir);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;
    watcher
        .watch(&corpus_dir, RecursiveMode::NonRecursive)
        .map_err(|e| {
            return error::Error::Watch {
                reason: format!("cannot watch {}: {e}", corpus_dir.display()),
            };
        })?;

    eprintln!("watch: monitoring {}, press Ctrl+C to stop", corpus_dir.display());

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        tracing::info!("change detected, re-linking");
        last_code = run_link(dir);
    }

    return Ok(last_code);
}

/// Run link once and report failures without leaving the loop.
fn run_link(dir: Option<&Path>) -> ExitCode {
    return match commands::link(dir) {
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2_u8)
        },
        Ok(()) => ExitCode::SUCCESS,
    };
}
