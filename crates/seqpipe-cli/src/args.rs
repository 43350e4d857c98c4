//! CLI argument definitions using clap
//!
//! - seqpipe run -p mbnb ecoli.gb            # Run a pipeline, print progress
//! - seqpipe run -p mbnb -o results ecoli.gb # ...and save each stage's result
//! - seqpipe pipelines -s local              # List the server's pipelines
//! - seqpipe config show                     # Show effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seqpipe")]
#[command(about = "Submit GenBank/FASTA files to a remote analysis pipeline server")]
#[command(
    long_about = r#"Submit GenBank/FASTA files to a remote analysis pipeline server

USAGE:
  seqpipe run -p <pipeline> <file>              # Run and follow progress
  seqpipe run -p <pipeline> -o <dir> <file>     # Also save stage results
  seqpipe pipelines                             # List available pipelines
  seqpipe config show                           # Show effective configuration

Servers may be given as host:port, http(s)://, ws(s):// or an alias
such as 'local'. Aliases can be added in seqpipe.json."#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (default: ./seqpipe.json, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output and debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a pipeline on an input file and follow its stages
    Run {
        /// GenBank or FASTA file to submit
        file: PathBuf,

        /// Pipeline to run (see `seqpipe pipelines`)
        #[arg(long, short)]
        pipeline: String,

        /// Server address or alias
        #[arg(long, short)]
        server: Option<String>,

        /// Directory to save stage results under (one subdirectory per input)
        #[arg(long = "out", short = 'o')]
        output_dir: Option<PathBuf>,

        /// Exit with a failure status when the server reports an error
        #[arg(long)]
        strict: bool,
    },

    /// List the pipelines a server supports
    Pipelines {
        /// Server address or alias
        #[arg(long, short)]
        server: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration after all sources are merged
    Show,

    /// List server aliases
    Aliases,
}
