//! seqpipe command-line client
//!
//! Submits a GenBank/FASTA file to a remote analysis server, follows the
//! pipeline's stages as they run, and optionally saves every stage result.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/seqpipe-cli
//! ```
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. Set `RUST_LOG` (for example
//! `RUST_LOG=seqpipe_core=debug`) or pass `--verbose`; `--log-json` switches
//! to JSON lines.

mod args;
mod commands;
mod console;
mod progress;
mod router;

use clap::Parser;
use crate::console::CliConsole;
use seqpipe_core::SeqpipeError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub use args::{Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_json) {
        eprintln!("failed to initialize logging: {e}");
    }

    match router::route(cli).await {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with environment-based filtering
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output and
/// the default is warnings only, so logs do not interleave with progress.
fn init_logging(verbose: bool, json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "seqpipe_core=debug,seqpipe=debug"
        } else {
            "warn"
        })
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().try_init().map_err(|e| anyhow::anyhow!("{e}"))
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!("{e}"))
    }
}

fn report_error(error: &anyhow::Error) {
    let console = CliConsole::default();
    match error.downcast_ref::<SeqpipeError>() {
        Some(err) => {
            console.error(&format!("[{}] {}", err.error_code(), err));
            if let Some(path) = err.path() {
                console.error(&format!("  at {}", path.display()));
            }
        }
        None => console.error(&format!("{error:#}")),
    }
}
