//! `seqpipe pipelines`: list what a server can run

use crate::console::{CliConsole, format};
use colored::*;
use seqpipe_core::control::{self, HttpControlPlane};
use seqpipe_core::{ClientConfig, SeqpipeResult};
use std::process::ExitCode;

/// Print the server's advertised pipelines and its uptime
pub async fn list(config: &ClientConfig, console: CliConsole) -> SeqpipeResult<ExitCode> {
    let server = config.resolve_server(None)?;
    let control = HttpControlPlane::new(server.clone(), config.http_timeout())?;
    let (uptime, mut pipelines) = control::server_status(&control).await?;

    console.print_header(&format!("Pipelines on {server}"));
    pipelines.sort();
    if pipelines.is_empty() {
        console.warn("Server advertises no pipelines");
    }
    for name in &pipelines {
        println!("  {} {}", "•".dimmed(), name.magenta().bold());
    }
    println!();
    console.print_field("Uptime", &format::uptime(uptime));

    Ok(ExitCode::SUCCESS)
}
