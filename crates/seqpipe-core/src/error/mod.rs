//! Error types for seqpipe
//!
//! A single error enum covers every failure a run can surface:
//! - transport failures opening or holding the session connection
//! - control-plane (HTTP) failures
//! - pipeline validation failures
//! - filesystem failures reading input or writing stage output
//! - server-reported and protocol-level failures

mod constructors;
mod conversions;
mod types;

pub use types::{SeqpipeError, SeqpipeResult};
