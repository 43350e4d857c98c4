//! `seqpipe run`: submit one input file and follow the pipeline

use crate::console::CliConsole;
use crate::progress::ConsoleObserver;
use seqpipe_core::{ClientConfig, SeqpipeResult, Session, SessionClient};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Arguments for a pipeline run
///
/// Server and output directory come from the merged configuration, which
/// already includes the command-line values.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub file: PathBuf,
    pub pipeline: String,
    pub strict: bool,
}

/// Run the pipeline and print a summary
pub async fn execute(
    config: &ClientConfig,
    args: RunArgs,
    console: CliConsole,
) -> SeqpipeResult<ExitCode> {
    let server = config.resolve_server(None)?;
    console.info(&format!("Server: {server}"));

    let client = SessionClient::connect_to(&server, config)?
        .with_observer(Arc::new(ConsoleObserver::new(console)));

    let session = Session {
        server,
        pipeline: args.pipeline,
        input: args.file,
        output_dir: config.output_dir.clone(),
    };
    let report = client.run(&session).await?;
    console.print_run_summary(&report);

    // A server-reported error only fails the process when asked to
    if args.strict {
        report.into_result()?;
    }
    Ok(ExitCode::SUCCESS)
}
