//! Core library for seqpipe
//!
//! seqpipe submits a GenBank/FASTA file to a remote analysis server, names
//! the pipeline to run on it, and follows the server's stage events as they
//! stream back over a WebSocket. Completed stage results can be written to a
//! local directory, one file per stage.
//!
//! The entry point is [`SessionClient::run`]:
//!
//! ```no_run
//! # async fn demo() -> seqpipe_core::error::SeqpipeResult<()> {
//! use seqpipe_core::{ClientConfig, Session, SessionClient};
//!
//! let config = ClientConfig::builtin();
//! let server = config.resolve_server(Some("local"))?;
//! let client = SessionClient::connect_to(&server, &config)?;
//! let report = client
//!     .run(&Session {
//!         server,
//!         pipeline: "mbnb".to_string(),
//!         input: "ecoli.gb".into(),
//!         output_dir: Some("results".into()),
//!     })
//!     .await?;
//! println!("{} stages completed", report.stages.completed.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod control;
pub mod dispatch;
pub mod error;
pub mod observer;
pub mod persist;
pub mod protocol;
pub mod session;

pub use config::{ClientConfig, ConfigLoader, ServerAddress};
pub use connection::{Connection, Connector, WebSocketConnector};
pub use control::{ControlPlane, HttpControlPlane};
pub use dispatch::{Disposition, MessageDispatcher, StageLedger};
pub use error::{SeqpipeError, SeqpipeResult};
pub use observer::{NoopObserver, SessionObserver};
pub use persist::ResultPersister;
pub use protocol::{ClientCommand, Envelope, StageResult};
pub use session::{Session, SessionClient, SessionOutcome, SessionReport};
