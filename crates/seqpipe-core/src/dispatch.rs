//! Inbound message dispatch
//!
//! One call to [`MessageDispatcher::handle`] per inbound frame, strictly in
//! arrival order. Each decoded envelope takes exactly one path:
//!
//! | type             | action                              | session   |
//! |------------------|-------------------------------------|-----------|
//! | `stage-start`    | notify                              | continues |
//! | `stage-complete` | notify, persist if output dir set   | continues |
//! | `error`          | report error text                   | ends      |
//! | `exit`           | notify                              | ends      |
//! | anything else    | warn                                | continues |
//!
//! Frames that fail to decode are logged and skipped.

use crate::error::SeqpipeResult;
use crate::observer::SessionObserver;
use crate::persist::ResultPersister;
use crate::protocol::{Envelope, StageComplete};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What the session does after a message has been handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Keep reading messages
    Continue,
    /// The server finished the run; close the connection
    Exit,
    /// The server aborted the run; close the connection
    ServerError(String),
}

impl Disposition {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Stage bookkeeping gathered while dispatching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageLedger {
    /// Stage names in completion order; a repeated stage appears again
    pub completed: Vec<String>,
    /// Completions the server served from its cache
    pub cached: usize,
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// Frames skipped because they could not be decoded or were unrecognized
    pub skipped: usize,
}

/// Routes decoded envelopes to their handling path
pub struct MessageDispatcher {
    persister: Option<ResultPersister>,
    observer: Arc<dyn SessionObserver>,
    ledger: StageLedger,
}

impl MessageDispatcher {
    /// Create a dispatcher; without a persister stage results are not saved
    pub fn new(persister: Option<ResultPersister>, observer: Arc<dyn SessionObserver>) -> Self {
        Self {
            persister,
            observer,
            ledger: StageLedger::default(),
        }
    }

    /// Handle one raw text frame
    ///
    /// Decoding failures are recovered here. Errors returned are failures
    /// to persist a stage result and end the session.
    pub fn handle(&mut self, raw: &str) -> SeqpipeResult<Disposition> {
        match Envelope::decode(raw) {
            Ok(envelope) => self.dispatch(envelope),
            Err(e) => {
                warn!("Skipping undecodable message: {}", e);
                self.ledger.skipped += 1;
                self.observer.protocol_error(&e);
                Ok(Disposition::Continue)
            }
        }
    }

    /// Handle one decoded envelope
    pub fn dispatch(&mut self, envelope: Envelope) -> SeqpipeResult<Disposition> {
        debug!(kind = envelope.kind(), "Dispatching envelope");
        match envelope {
            Envelope::StageStart(start) => {
                info!(stage = %start.stage, "Stage started");
                self.observer.stage_started(&start.stage);
                Ok(Disposition::Continue)
            }
            Envelope::StageComplete(done) => {
                self.stage_complete(done)?;
                Ok(Disposition::Continue)
            }
            Envelope::Error(err) => {
                error!("Server reported error: {}", err.message());
                self.observer.server_error(err.message());
                Ok(Disposition::ServerError(err.message().to_string()))
            }
            Envelope::Exit => {
                info!("Server finished the run");
                self.observer.exited();
                Ok(Disposition::Exit)
            }
            Envelope::Unrecognized { kind, .. } => {
                warn!("Unknown message type: {}", kind);
                self.ledger.skipped += 1;
                self.observer.unrecognized(&kind);
                Ok(Disposition::Continue)
            }
        }
    }

    fn stage_complete(&mut self, done: StageComplete) -> SeqpipeResult<()> {
        info!(
            stage = %done.stage,
            elapsed = ?done.time_taken,
            cached = done.cached,
            "Stage completed"
        );
        self.observer
            .stage_completed(&done.stage, done.time_taken, done.cached);

        if let Some(persister) = &self.persister {
            let path = persister.persist(&done.stage, &done.result)?;
            self.observer.stage_saved(&done.stage, &path);
            self.ledger.written.push(path);
        }

        if done.cached {
            self.ledger.cached += 1;
        }
        self.ledger.completed.push(done.stage);
        Ok(())
    }

    /// Bookkeeping gathered so far
    pub fn ledger(&self) -> &StageLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> StageLedger {
        self.ledger
    }
}
