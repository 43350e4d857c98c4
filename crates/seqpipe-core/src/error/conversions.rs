//! From trait implementations for SeqpipeError conversions

use super::types::SeqpipeError;

impl From<std::io::Error> for SeqpipeError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem(error.to_string())
    }
}

impl From<serde_json::Error> for SeqpipeError {
    fn from(error: serde_json::Error) -> Self {
        Self::protocol(error.to_string())
    }
}

impl From<reqwest::Error> for SeqpipeError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::ControlPlane {
            message: error.to_string(),
            url,
            status_code,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for SeqpipeError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::connection(error.to_string())
    }
}

impl From<url::ParseError> for SeqpipeError {
    fn from(error: url::ParseError) -> Self {
        Self::invalid_input(format!("invalid server address: {}", error))
    }
}
