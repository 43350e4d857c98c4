//! Configuration inspection commands

use crate::console::CliConsole;
use anyhow::Context;
use colored::*;
use seqpipe_core::ClientConfig;
use std::process::ExitCode;

/// Show the effective configuration as JSON
pub fn show(config: &ClientConfig, console: CliConsole) -> anyhow::Result<ExitCode> {
    console.print_header("Configuration");
    let rendered =
        serde_json::to_string_pretty(config).context("failed to render configuration")?;
    println!("{rendered}");

    match config.http_timeout() {
        Some(timeout) => console.info(&format!("Control-plane timeout: {}s", timeout.as_secs())),
        None => console.info("Control-plane timeout: disabled"),
    }
    Ok(ExitCode::SUCCESS)
}

/// List server aliases
pub fn aliases(config: &ClientConfig, console: CliConsole) -> anyhow::Result<ExitCode> {
    console.print_header("Server Aliases");
    let width = config.aliases.keys().map(String::len).max().unwrap_or(0);
    for (name, address) in &config.aliases {
        let marker = if config.server.as_deref() == Some(name.as_str()) {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        let padded = format!("{name:width$}");
        println!("  {}  {}{}", padded.bold(), address.cyan(), marker);
    }
    Ok(ExitCode::SUCCESS)
}
