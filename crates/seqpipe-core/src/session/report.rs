//! Session outcome reporting

use crate::dispatch::StageLedger;
use crate::error::{SeqpipeError, SeqpipeResult};
use std::path::PathBuf;
use std::time::Duration;

/// How the server ended the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The server sent `exit`
    Exited,
    /// The server sent `error` with this message
    ServerError(String),
}

/// Summary of one completed session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub pipeline: String,
    pub outcome: SessionOutcome,
    /// Where stage files were written, if anywhere
    pub output_dir: Option<PathBuf>,
    pub stages: StageLedger,
    /// Wall-clock time from connecting to the terminal event
    pub elapsed: Duration,
}

impl SessionReport {
    /// Whether the server finished the run without reporting an error
    pub fn is_success(&self) -> bool {
        self.outcome == SessionOutcome::Exited
    }

    /// Turn a server-reported failure into an error
    pub fn into_result(self) -> SeqpipeResult<Self> {
        match &self.outcome {
            SessionOutcome::Exited => Ok(self),
            SessionOutcome::ServerError(message) => {
                Err(SeqpipeError::ServerReported(message.clone()))
            }
        }
    }
}
