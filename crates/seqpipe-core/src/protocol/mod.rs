//! Session wire protocol
//!
//! JSON text frames exchanged over the session WebSocket.

mod command;
mod envelope;

pub use command::ClientCommand;
pub use envelope::{Envelope, ServerError, StageComplete, StageResult, StageStart};
