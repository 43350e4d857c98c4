//! Inbound server envelopes
//!
//! Every server message is a `{"type": ..., "payload": ...}` object. It is
//! decoded once here into [`Envelope`]; nothing downstream inspects raw JSON.

use crate::error::{SeqpipeError, SeqpipeResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Decoded server message
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// A pipeline stage began running
    StageStart(StageStart),
    /// A pipeline stage finished and carries its result
    StageComplete(StageComplete),
    /// The server aborted the run
    Error(ServerError),
    /// The server finished the run
    Exit,
    /// A `type` this client does not know, kept with its raw payload
    Unrecognized { kind: String, payload: Value },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StageStart {
    pub stage: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageComplete {
    pub stage: String,
    /// Server-side run time, sent as milliseconds; unusable values read as `None`
    #[serde(default, deserialize_with = "millis_opt")]
    pub time_taken: Option<Duration>,
    pub result: StageResult,
    /// Whether the server reused a previously computed result
    #[serde(default)]
    pub cached: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerError {
    #[serde(default)]
    pub error: String,
}

impl ServerError {
    /// Error text, with a placeholder when the server sent none
    pub fn message(&self) -> &str {
        if self.error.is_empty() {
            "server reported an error without a message"
        } else {
            &self.error
        }
    }
}

/// Output of one stage: plain text, or any other JSON value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StageResult {
    Text(String),
    Structured(Value),
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl Envelope {
    /// Decode one text frame
    pub fn decode(text: &str) -> SeqpipeResult<Self> {
        let raw: RawEnvelope = serde_json::from_str(text)
            .map_err(|e| SeqpipeError::protocol(format!("malformed envelope: {}", e)))?;

        let envelope = match raw.kind.as_str() {
            "stage-start" => Self::StageStart(payload(&raw.kind, raw.payload)?),
            "stage-complete" => Self::StageComplete(payload(&raw.kind, raw.payload)?),
            "error" => Self::Error(payload(&raw.kind, raw.payload)?),
            "exit" => Self::Exit,
            _ => Self::Unrecognized {
                kind: raw.kind,
                payload: raw.payload,
            },
        };
        Ok(envelope)
    }

    /// The wire `type` tag
    pub fn kind(&self) -> &str {
        match self {
            Self::StageStart(_) => "stage-start",
            Self::StageComplete(_) => "stage-complete",
            Self::Error(_) => "error",
            Self::Exit => "exit",
            Self::Unrecognized { kind, .. } => kind,
        }
    }
}

fn payload<T: DeserializeOwned>(kind: &str, value: Value) -> SeqpipeResult<T> {
    serde_json::from_value(value)
        .map_err(|e| SeqpipeError::protocol(format!("invalid '{}' payload: {}", kind, e)))
}

fn millis_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let elapsed = value
            .as_f64()
            .and_then(|ms| Duration::try_from_secs_f64(ms / 1000.0).ok());
        if elapsed.is_none() {
            warn!("Ignoring invalid timeTaken: {}", value);
        }
        elapsed
    }))
}
