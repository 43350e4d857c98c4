//! WebSocket transport

use super::{Connection, Connector};
use crate::error::{SeqpipeError, SeqpipeResult};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};
use url::Url;

/// Opens WebSocket connections
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketConnector;

impl WebSocketConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn open(&self, url: &Url) -> SeqpipeResult<Box<dyn Connection>> {
        debug!("Opening WebSocket connection to {}", url);

        let (stream, response) = connect_async(url.as_str()).await.map_err(|e| {
            SeqpipeError::connection_to(format!("failed to connect: {}", e), url.as_str())
        })?;

        info!(status = %response.status(), "Connected to {}", url);
        Ok(Box::new(WebSocketConnection::new(stream)))
    }
}

/// Live WebSocket session connection
pub struct WebSocketConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    closed: bool,
}

impl WebSocketConnection {
    pub fn new(stream: WebSocketStream<MaybeTlsStream<TcpStream>>) -> Self {
        Self {
            stream,
            closed: false,
        }
    }
}

#[async_trait]
impl Connection for WebSocketConnection {
    async fn send_text(&mut self, text: String) -> SeqpipeResult<()> {
        if self.closed {
            return Err(SeqpipeError::connection("connection is already closed"));
        }
        debug!(bytes = text.len(), "Sending text frame");
        self.stream.send(Message::Text(text)).await?;
        Ok(())
    }

    async fn next_text(&mut self) -> Option<SeqpipeResult<String>> {
        if self.closed {
            return None;
        }
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "Peer closed the connection");
                    return None;
                }
                Ok(Message::Binary(data)) => {
                    warn!(bytes = data.len(), "Ignoring binary frame");
                }
                // Ping/pong are answered by tungstenite itself
                Ok(_) => {}
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn close(&mut self) -> SeqpipeResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.stream.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => {
                debug!("Connection closed");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
