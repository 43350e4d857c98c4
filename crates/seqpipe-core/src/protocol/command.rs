//! Outbound client commands

use crate::error::SeqpipeResult;
use serde::Serialize;

/// Command sent from the client to the server
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientCommand<'a> {
    /// Start `pipeline` on the given input; sent once per session
    Start {
        pipeline: &'a str,
        filepath: &'a str,
        data: &'a str,
    },
}

impl ClientCommand<'_> {
    /// Encode as a JSON text frame
    pub fn encode(&self) -> SeqpipeResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
