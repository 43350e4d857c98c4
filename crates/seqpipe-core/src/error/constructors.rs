//! Constructor methods for SeqpipeError

use super::types::SeqpipeError;
use std::path::PathBuf;

impl SeqpipeError {
    /// Create a new connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            url: None,
        }
    }

    /// Create a connection error for a specific URL
    pub fn connection_to(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            url: Some(url.into()),
        }
    }

    /// Create a new control-plane error
    pub fn control_plane(message: impl Into<String>) -> Self {
        Self::ControlPlane {
            message: message.into(),
            url: None,
            status_code: None,
        }
    }

    /// Create a control-plane error for a non-success HTTP status
    pub fn control_plane_status(
        message: impl Into<String>,
        url: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::ControlPlane {
            message: message.into(),
            url: Some(url.into()),
            status_code: Some(status_code),
        }
    }

    /// Create an unsupported pipeline error
    pub fn unsupported_pipeline(requested: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnsupportedPipeline {
            requested: requested.into(),
            available,
        }
    }

    /// Create a new filesystem error
    pub fn filesystem(message: impl Into<String>) -> Self {
        Self::Filesystem {
            message: message.into(),
            path: None,
        }
    }

    /// Create a filesystem error tied to a path
    pub fn filesystem_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Filesystem {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a new protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
