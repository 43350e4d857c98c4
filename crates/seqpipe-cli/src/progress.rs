//! Live session progress for the terminal

use crate::console::{CliConsole, format};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use seqpipe_core::{SeqpipeError, SessionObserver};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Renders session events; shows a spinner for the running stage on a TTY
pub struct ConsoleObserver {
    console: CliConsole,
    spinner: Option<ProgressBar>,
}

impl ConsoleObserver {
    pub fn new(console: CliConsole) -> Self {
        let spinner = ::console::Term::stderr().is_term().then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.blue} {msg} {elapsed:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        });
        Self { console, spinner }
    }

    /// Print a line without tearing the spinner
    fn line(&self, text: String) {
        match &self.spinner {
            Some(pb) if !pb.is_finished() => pb.println(text),
            _ => println!("{text}"),
        }
    }

    fn stop_spinner(&self) {
        if let Some(pb) = &self.spinner {
            pb.finish_and_clear();
        }
    }
}

impl SessionObserver for ConsoleObserver {
    fn connected(&self, url: &Url) {
        self.console.info(&format!("Connected to {url}"));
    }

    fn uptime(&self, uptime: Duration) {
        self.line(format!(
            "{} server up {}",
            "ℹ".blue().bold(),
            format::uptime(uptime)
        ));
    }

    fn submitted(&self, pipeline: &str, input: &Path) {
        self.line(format!(
            "{} Submitted {} to pipeline {}",
            "→".dimmed(),
            format::path(input),
            pipeline.magenta().bold()
        ));
    }

    fn stage_started(&self, stage: &str) {
        match &self.spinner {
            Some(pb) => {
                pb.set_message(format!("Running {}", stage.cyan().bold()));
                pb.enable_steady_tick(Duration::from_millis(100));
            }
            None => println!("{} {} started", "▸".cyan(), stage.cyan().bold()),
        }
    }

    fn stage_completed(&self, stage: &str, elapsed: Option<Duration>, cached: bool) {
        let timing = elapsed
            .map(|d| format!(" in {}", format::duration(d)))
            .unwrap_or_default();
        let cache = if cached {
            format!(" {}", "(cached)".dimmed())
        } else {
            String::new()
        };
        self.line(format!(
            "{} {} completed{}{}",
            "✓".green().bold(),
            stage.green().bold(),
            timing,
            cache
        ));
    }

    fn stage_saved(&self, _stage: &str, path: &Path) {
        if self.console.is_verbose() {
            self.line(format!("  {} {}", "saved".dimmed(), format::path(path)));
        }
    }

    fn server_error(&self, message: &str) {
        self.stop_spinner();
        self.console.error(&format!("Server error: {message}"));
    }

    fn exited(&self) {
        self.stop_spinner();
        self.console.success("Pipeline finished");
    }

    fn unrecognized(&self, kind: &str) {
        self.line(format!(
            "{} {}",
            "⚠".yellow().bold(),
            format!("Ignoring unknown message type '{kind}'").yellow()
        ));
    }

    fn protocol_error(&self, error: &SeqpipeError) {
        self.line(format!(
            "{} {}",
            "⚠".yellow().bold(),
            format!("Ignoring malformed message: {error}").yellow()
        ));
    }
}

impl Drop for ConsoleObserver {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
