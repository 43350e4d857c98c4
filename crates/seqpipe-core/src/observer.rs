//! Session progress notifications
//!
//! The core never prints. Progress is reported through [`SessionObserver`]
//! and rendered by whoever drives the session (the CLI console, a test
//! recorder, or nothing at all).

use crate::error::SeqpipeError;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Receives user-facing progress for one session
///
/// All methods default to no-ops.
pub trait SessionObserver: Send + Sync {
    /// The session connection is open
    fn connected(&self, _url: &Url) {}

    /// Server uptime reported by the control plane
    fn uptime(&self, _uptime: Duration) {}

    /// The `start` command has been sent
    fn submitted(&self, _pipeline: &str, _input: &Path) {}

    fn stage_started(&self, _stage: &str) {}

    fn stage_completed(&self, _stage: &str, _elapsed: Option<Duration>, _cached: bool) {}

    /// A stage result was written to disk
    fn stage_saved(&self, _stage: &str, _path: &Path) {}

    /// The server aborted the run with an error message
    fn server_error(&self, _message: &str) {}

    /// The server finished the run
    fn exited(&self) {}

    /// A message with an unknown `type` was skipped
    fn unrecognized(&self, _kind: &str) {}

    /// A message could not be decoded and was skipped
    fn protocol_error(&self, _error: &SeqpipeError) {}
}

/// Observer that discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
