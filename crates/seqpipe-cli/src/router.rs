//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands::{self, RunArgs};
use crate::console::CliConsole;
use seqpipe_core::{ClientConfig, ConfigLoader};
use std::process::ExitCode;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<ExitCode> {
    let console = CliConsole::new(cli.verbose);
    let config = ConfigLoader::discover(cli.config.as_deref())
        .with_args(overrides(&cli.command))
        .load()?;
    tracing::debug!(?config, "Effective configuration");

    let code = match cli.command {
        Commands::Run {
            file,
            pipeline,
            strict,
            ..
        } => {
            commands::run::execute(
                &config,
                RunArgs {
                    file,
                    pipeline,
                    strict,
                },
                console,
            )
            .await?
        }
        Commands::Pipelines { .. } => commands::pipelines::list(&config, console).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config, console)?,
            ConfigAction::Aliases => commands::config::aliases(&config, console)?,
        },
    };
    Ok(code)
}

/// Configuration values given as command-line flags
fn overrides(command: &Commands) -> ClientConfig {
    match command {
        Commands::Run {
            server, output_dir, ..
        } => ClientConfig {
            server: server.clone(),
            output_dir: output_dir.clone(),
            ..ClientConfig::default()
        },
        Commands::Pipelines { server } => ClientConfig {
            server: server.clone(),
            ..ClientConfig::default()
        },
        Commands::Config { .. } => ClientConfig::default(),
    }
}
