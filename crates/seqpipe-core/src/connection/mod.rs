//! Session connection management
//!
//! A [`Connector`] opens one bidirectional text connection per session. The
//! returned [`Connection`] is owned by the running session, which closes it
//! on every exit path.

mod websocket;

pub use websocket::{WebSocketConnection, WebSocketConnector};

use crate::error::SeqpipeResult;
use async_trait::async_trait;
use url::Url;

/// Opens session connections
#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a connection to `url`
    ///
    /// Resolves exactly once: with the live connection when the transport
    /// reports it is open, or with a connection error. No timeout is applied.
    async fn open(&self, url: &Url) -> SeqpipeResult<Box<dyn Connection>>;
}

/// One open, bidirectional text-frame connection
#[async_trait]
pub trait Connection: Send {
    /// Send one text frame
    async fn send_text(&mut self, text: String) -> SeqpipeResult<()>;

    /// Next inbound text frame; `None` once the peer has closed the stream
    async fn next_text(&mut self) -> Option<SeqpipeResult<String>>;

    /// Close the connection; closing twice is a no-op
    async fn close(&mut self) -> SeqpipeResult<()>;
}
