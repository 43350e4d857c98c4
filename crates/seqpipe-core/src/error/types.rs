//! Core error type for seqpipe

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for seqpipe operations
pub type SeqpipeResult<T> = Result<T, SeqpipeError>;

/// Main error type for seqpipe
#[derive(Error, Debug)]
pub enum SeqpipeError {
    /// The session transport failed to open, or dropped before a terminal event
    #[error("Connection error: {message}")]
    Connection { message: String, url: Option<String> },

    /// An HTTP control-plane request failed or returned a non-success status
    #[error("Control plane error: {message}")]
    ControlPlane {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// The requested pipeline is not advertised by the server
    #[error("Unsupported pipeline '{requested}' (server supports: {})", .available.join(", "))]
    UnsupportedPipeline {
        requested: String,
        available: Vec<String>,
    },

    /// Reading input, creating the output directory or writing a stage file failed
    #[error("Filesystem error: {message}")]
    Filesystem {
        message: String,
        path: Option<PathBuf>,
    },

    /// The server sent an `error` envelope
    #[error("Server reported error: {0}")]
    ServerReported(String),

    /// An inbound message could not be decoded
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SeqpipeError {
    /// Stable short code for programmatic handling and CLI output
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "CONNECTION",
            Self::ControlPlane { .. } => "CONTROL_PLANE",
            Self::UnsupportedPipeline { .. } => "UNSUPPORTED_PIPELINE",
            Self::Filesystem { .. } => "FILESYSTEM",
            Self::ServerReported(_) => "SERVER_REPORTED",
            Self::Protocol(_) => "PROTOCOL",
            Self::Config(_) => "CONFIG",
            Self::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// Path involved in a filesystem failure, if known
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Filesystem { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}
