mod collector;
mod commands;
mod config;
mod corpus;
mod diagnostics;
mod error;
mod rewriter;
mod types;
mod watch;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Command-line arguments for `docxref`.
#[derive(Parser)]
#[command(
    name = "docxref",
    version,
    about = "Link every mention of a declared XML id to its declaration"
)]
struct Cli {
    /// Subcommand to run; `link` when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Corpus directory, overriding `dir` from .docxref.toml
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

/// The operations docxref performs on the corpus.
#[derive(Subcommand)]
enum Commands {
    /// Report documents that `link` would change (exit 1 if any)
    Check,
    /// List collected identifiers in collection order
    Ids {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Collect ids and rewrite every document with links (default)
    Link,
    /// Link, then re-link whenever the corpus directory changes
    Watch,
}

/// Route `tracing` events to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Parse arguments, run the chosen command, map the outcome to an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dir = cli.dir.as_deref();
    let result = match cli.command.unwrap_or(Commands::Link) {
        Commands::Check => commands::check(dir),
        Commands::Ids { json } => commands::ids(dir, json).map(|()| return ExitCode::SUCCESS),
        Commands::Link => commands::link(dir).map(|()| return ExitCode::SUCCESS),
        Commands::Watch => watch::run(dir),
    };

    return match result {
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2)
        },
        Ok(code) => code,
    };
}
