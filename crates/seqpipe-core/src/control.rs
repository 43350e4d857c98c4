//! HTTP control plane
//!
//! Two JSON endpoints sit next to the session socket:
//! - `GET /uptime` → `{"uptime": <ms>}`
//! - `GET /pipelines` → `{"pipelines": ["name", ...]}`

use crate::config::ServerAddress;
use crate::error::{SeqpipeError, SeqpipeResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Read-only queries against the server's control plane
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// How long the server has been running
    async fn uptime(&self) -> SeqpipeResult<Duration>;

    /// Names of the pipelines the server can run
    async fn pipelines(&self) -> SeqpipeResult<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct UptimeResponse {
    uptime: f64,
}

#[derive(Debug, Deserialize)]
struct PipelinesResponse {
    pipelines: Vec<String>,
}

/// Control-plane client over HTTP
#[derive(Debug, Clone)]
pub struct HttpControlPlane {
    http_client: Client,
    address: ServerAddress,
}

impl HttpControlPlane {
    /// Create a client; `timeout` of `None` means requests never time out
    pub fn new(address: ServerAddress, timeout: Option<Duration>) -> SeqpipeResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            address,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> SeqpipeResult<T> {
        let url = self.address.endpoint(endpoint)?;
        debug!("Fetching {}", url);

        let response = self.http_client.get(url.clone()).send().await.map_err(|e| {
            SeqpipeError::control_plane(format!("request to {} failed: {}", url, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Control plane error: {} - {}", status, body);
            return Err(SeqpipeError::control_plane_status(
                format!("GET /{} returned {}: {}", endpoint, status, body.trim()),
                url.as_str(),
                status.as_u16(),
            ));
        }

        response.json().await.map_err(|e| {
            SeqpipeError::control_plane(format!("invalid response from /{}: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn uptime(&self) -> SeqpipeResult<Duration> {
        let body: UptimeResponse = self.get_json("uptime").await?;
        Duration::try_from_secs_f64(body.uptime / 1000.0)
            .map_err(|e| SeqpipeError::control_plane(format!("invalid uptime {}: {}", body.uptime, e)))
    }

    async fn pipelines(&self) -> SeqpipeResult<Vec<String>> {
        let body: PipelinesResponse = self.get_json("pipelines").await?;
        debug!("Server advertises {} pipelines", body.pipelines.len());
        Ok(body.pipelines)
    }
}

/// Fetch uptime and the pipeline list concurrently
pub async fn server_status(control: &dyn ControlPlane) -> SeqpipeResult<(Duration, Vec<String>)> {
    tokio::try_join!(control.uptime(), control.pipelines())
}
