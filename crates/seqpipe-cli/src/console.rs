//! CLI console utilities

use colored::*;
use seqpipe_core::{SessionOutcome, SessionReport};

/// CLI console for formatted output
#[derive(Debug, Clone, Copy)]
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.len()).dimmed());
    }

    /// Print a `key: value` line
    pub fn print_field(&self, key: &str, value: &str) {
        println!("{} {}", format!("{key}:").bold(), value);
    }

    /// Print the end-of-run summary
    pub fn print_run_summary(&self, report: &SessionReport) {
        self.print_header("Run Summary");

        let status = match &report.outcome {
            SessionOutcome::Exited => "SUCCESS".green().bold(),
            SessionOutcome::ServerError(_) => "FAILED".red().bold(),
        };
        println!("Status: {status}");
        println!("Pipeline: {}", report.pipeline);
        println!("Stages: {}", report.stages.completed.len());
        if report.stages.cached > 0 {
            println!("Cached: {}", report.stages.cached.to_string().green());
        }
        if let Some(dir) = &report.output_dir {
            println!(
                "Output: {} ({} files)",
                format::path(dir),
                report.stages.written.len()
            );
        }
        if self.verbose && report.stages.skipped > 0 {
            println!("Skipped messages: {}", report.stages.skipped);
        }
        println!("Duration: {}", format::duration(report.elapsed));
    }
}

impl Default for CliConsole {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Utility functions for console formatting
pub mod format {
    use colored::*;
    use std::time::Duration;

    /// Format a file path
    pub fn path(path: &std::path::Path) -> String {
        path.display().to_string().cyan().to_string()
    }

    /// Format a stage run time
    pub fn duration(duration: Duration) -> String {
        format!("{:.2}s", duration.as_secs_f64())
            .yellow()
            .to_string()
    }

    /// Format a long duration as days/hours/minutes, e.g. `2d 3h 14m`
    pub fn uptime(duration: Duration) -> String {
        let total = duration.as_secs();
        let (days, hours, minutes, seconds) = (
            total / 86_400,
            total % 86_400 / 3_600,
            total % 3_600 / 60,
            total % 60,
        );

        let mut parts = Vec::new();
        if days > 0 {
            parts.push(format!("{days}d"));
        }
        if hours > 0 {
            parts.push(format!("{hours}h"));
        }
        if minutes > 0 {
            parts.push(format!("{minutes}m"));
        }
        if parts.is_empty() {
            parts.push(format!("{seconds}s"));
        }
        parts.join(" ")
    }

}
