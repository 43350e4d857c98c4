//! Server address parsing
//!
//! A server is named once on the command line and reached two ways: the
//! HTTP control plane and the WebSocket session endpoint. Both URLs are
//! derived from the same address so they always point at the same host.

use crate::error::{SeqpipeError, SeqpipeResult};
use std::fmt;
use url::Url;

/// Resolved server address with matching HTTP and WebSocket URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    http_base: Url,
    websocket: Url,
}

impl ServerAddress {
    /// Parse `host:port`, `http(s)://...` or `ws(s)://...`
    pub fn parse(input: &str) -> SeqpipeResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SeqpipeError::invalid_input("server address is empty"));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let mut parsed = Url::parse(&with_scheme)?;
        if parsed.host_str().is_none() {
            return Err(SeqpipeError::invalid_input(format!(
                "server address '{}' has no host",
                input
            )));
        }

        // Endpoints are joined relative to the base, so it must end in '/'
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        parsed.set_query(None);
        parsed.set_fragment(None);

        let (http_scheme, ws_scheme) = match parsed.scheme() {
            "http" | "ws" => ("http", "ws"),
            "https" | "wss" => ("https", "wss"),
            other => {
                return Err(SeqpipeError::invalid_input(format!(
                    "unsupported scheme '{}' in server address",
                    other
                )));
            }
        };

        let mut http_base = parsed.clone();
        let mut websocket = parsed;
        http_base
            .set_scheme(http_scheme)
            .map_err(|_| SeqpipeError::invalid_input("cannot derive HTTP address"))?;
        websocket
            .set_scheme(ws_scheme)
            .map_err(|_| SeqpipeError::invalid_input("cannot derive WebSocket address"))?;

        Ok(Self {
            http_base,
            websocket,
        })
    }

    /// Base URL of the HTTP control plane
    pub fn http_base(&self) -> &Url {
        &self.http_base
    }

    /// URL of the WebSocket session endpoint
    pub fn websocket_url(&self) -> &Url {
        &self.websocket
    }

    /// Control-plane endpoint URL, e.g. `endpoint("uptime")`
    pub fn endpoint(&self, name: &str) -> SeqpipeResult<Url> {
        Ok(self.http_base.join(name.trim_start_matches('/'))?)
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.http_base)
    }
}
