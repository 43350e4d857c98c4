//! End-to-end session orchestration
//!
//! One [`Session`] is one attempt at running a pipeline on one input file:
//!
//! 1. open the session connection
//! 2. fetch uptime and the pipeline list concurrently
//! 3. reject pipelines the server does not advertise
//! 4. read the input file
//! 5. create the per-run output directory, if output is enabled
//! 6. send a single `start` command
//! 7. dispatch inbound messages until `exit` or `error`
//!
//! The connection is closed once, after the run returns, whatever the
//! outcome. Nothing is retried.

mod report;

pub use report::{SessionOutcome, SessionReport};

use crate::config::{ClientConfig, ServerAddress};
use crate::connection::{Connection, Connector, WebSocketConnector};
use crate::control::{self, ControlPlane, HttpControlPlane};
use crate::dispatch::{Disposition, MessageDispatcher, StageLedger};
use crate::error::{SeqpipeError, SeqpipeResult};
use crate::observer::{NoopObserver, SessionObserver};
use crate::persist::ResultPersister;
use crate::protocol::ClientCommand;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything needed to run one pipeline on one input
#[derive(Debug, Clone)]
pub struct Session {
    pub server: ServerAddress,
    pub pipeline: String,
    pub input: PathBuf,
    /// Root for stage output; results land in `<output_dir>/<input file name>/`
    pub output_dir: Option<PathBuf>,
}

/// Runs sessions against one server
pub struct SessionClient {
    connector: Arc<dyn Connector>,
    control: Arc<dyn ControlPlane>,
    observer: Arc<dyn SessionObserver>,
}

impl SessionClient {
    /// Create a client from explicit transport and control-plane implementations
    pub fn new(connector: Arc<dyn Connector>, control: Arc<dyn ControlPlane>) -> Self {
        Self {
            connector,
            control,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Client speaking WebSocket and HTTP to `server`
    pub fn connect_to(server: &ServerAddress, config: &ClientConfig) -> SeqpipeResult<Self> {
        let control = HttpControlPlane::new(server.clone(), config.http_timeout())?;
        Ok(Self::new(Arc::new(WebSocketConnector::new()), Arc::new(control)))
    }

    /// Report progress to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run one session to its terminal event
    ///
    /// A server-reported error ends the session normally and is returned in
    /// the report. Setup failures, lost connections and failed stage writes
    /// are returned as errors.
    pub async fn run(&self, session: &Session) -> SeqpipeResult<SessionReport> {
        let started = Instant::now();
        let url = session.server.websocket_url();

        let mut connection = self.connector.open(url).await?;
        self.observer.connected(url);

        let result = self.drive(session, connection.as_mut()).await;

        if let Err(e) = connection.close().await {
            warn!("Failed to close connection cleanly: {}", e);
        }

        let (outcome, stages, output_dir) = result?;
        info!(
            pipeline = %session.pipeline,
            stages = stages.completed.len(),
            outcome = ?outcome,
            "Session finished"
        );
        Ok(SessionReport {
            pipeline: session.pipeline.clone(),
            outcome,
            output_dir,
            stages,
            elapsed: started.elapsed(),
        })
    }

    async fn drive(
        &self,
        session: &Session,
        connection: &mut dyn Connection,
    ) -> SeqpipeResult<(SessionOutcome, StageLedger, Option<PathBuf>)> {
        let (uptime, pipelines) = control::server_status(self.control.as_ref()).await?;
        debug!(?uptime, ?pipelines, "Server status");
        self.observer.uptime(uptime);

        if !pipelines.iter().any(|p| p == &session.pipeline) {
            return Err(SeqpipeError::unsupported_pipeline(
                session.pipeline.clone(),
                pipelines,
            ));
        }

        let data = tokio::fs::read_to_string(&session.input)
            .await
            .map_err(|e| {
                SeqpipeError::filesystem_at(format!("failed to read input: {}", e), &session.input)
            })?;
        debug!(bytes = data.len(), "Read input {}", session.input.display());

        let persister = match &session.output_dir {
            Some(root) => {
                let persister = ResultPersister::for_input(root, &session.input)?;
                persister.prepare()?;
                Some(persister)
            }
            None => None,
        };
        let output_dir = persister.as_ref().map(|p| p.dir().to_path_buf());
        let mut dispatcher = MessageDispatcher::new(persister, self.observer.clone());

        let filepath = session.input.to_string_lossy();
        let start = ClientCommand::Start {
            pipeline: &session.pipeline,
            filepath: &filepath,
            data: &data,
        };
        connection.send_text(start.encode()?).await?;
        info!(pipeline = %session.pipeline, "Submitted {}", session.input.display());
        self.observer.submitted(&session.pipeline, &session.input);

        loop {
            let text = match connection.next_text().await {
                Some(frame) => frame?,
                None => {
                    return Err(SeqpipeError::connection(
                        "connection closed before the server finished the run",
                    ));
                }
            };

            let disposition = dispatcher.handle(&text)?;
            if disposition.is_terminal() {
                let outcome = match disposition {
                    Disposition::ServerError(message) => SessionOutcome::ServerError(message),
                    _ => SessionOutcome::Exited,
                };
                return Ok((outcome, dispatcher.into_ledger(), output_dir));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::MockControlPlane;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::fs;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;
    use url::Url;

    /// Shared view of what the client did on the wire
    #[derive(Default)]
    struct Wire {
        sent: Mutex<Vec<String>>,
        closes: AtomicUsize,
    }

    impl Wire {
        fn sent(&self) -> Vec<Value> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|s| serde_json::from_str(s).unwrap())
                .collect()
        }

        fn closes(&self) -> usize {
            self.closes.load(Ordering::SeqCst)
        }
    }

    struct ScriptedConnector {
        wire: Arc<Wire>,
        inbound: Vec<String>,
        refuse: bool,
    }

    struct ScriptedConnection {
        wire: Arc<Wire>,
        inbound: VecDeque<String>,
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        async fn open(&self, url: &Url) -> SeqpipeResult<Box<dyn Connection>> {
            if self.refuse {
                return Err(SeqpipeError::connection_to("connection refused", url.as_str()));
            }
            Ok(Box::new(ScriptedConnection {
                wire: self.wire.clone(),
                inbound: self.inbound.iter().cloned().collect(),
            }))
        }
    }

    #[async_trait]
    impl Connection for ScriptedConnection {
        async fn send_text(&mut self, text: String) -> SeqpipeResult<()> {
            self.wire.sent.lock().unwrap().push(text);
            Ok(())
        }

        async fn next_text(&mut self) -> Option<SeqpipeResult<String>> {
            self.inbound.pop_front().map(Ok)
        }

        async fn close(&mut self) -> SeqpipeResult<()> {
            self.wire.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn control_with(pipelines: &[&str]) -> MockControlPlane {
        let pipelines: Vec<String> = pipelines.iter().map(|p| p.to_string()).collect();
        let mut control = MockControlPlane::new();
        control
            .expect_uptime()
            .returning(|| Ok(Duration::from_secs(3600)));
        control
            .expect_pipelines()
            .returning(move || Ok(pipelines.clone()));
        control
    }

    fn client(control: MockControlPlane, inbound: &[&str]) -> (SessionClient, Arc<Wire>) {
        let wire = Arc::new(Wire::default());
        let connector = ScriptedConnector {
            wire: wire.clone(),
            inbound: inbound.iter().map(|s| s.to_string()).collect(),
            refuse: false,
        };
        (
            SessionClient::new(Arc::new(connector), Arc::new(control)),
            wire,
        )
    }

    struct Fixture {
        dir: TempDir,
        input: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ecoli.gb");
        fs::write(&input, "LOCUS       ECOLI\nORIGIN\n        1 acgt\n//\n").unwrap();
        Fixture { dir, input }
    }

    fn session(fx: &Fixture, pipeline: &str, output: bool) -> Session {
        Session {
            server: ServerAddress::parse("localhost:8080").unwrap(),
            pipeline: pipeline.to_string(),
            input: fx.input.clone(),
            output_dir: output.then(|| fx.dir.path().join("out")),
        }
    }

    const EXIT: &str = r#"{"type":"exit","payload":{}}"#;

    #[tokio::test]
    async fn test_supported_pipeline_sends_one_start() {
        let fx = fixture();
        let (client, wire) = client(
            control_with(&["mbnb", "njbb"]),
            &[r#"{"type":"stage-start","payload":{"stage":"align"}}"#, EXIT],
        );

        let report = client.run(&session(&fx, "mbnb", false)).await.unwrap();
        assert!(report.is_success());
        assert_eq!(report.output_dir, None);

        let sent = wire.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["type"], "start");
        assert_eq!(sent[0]["pipeline"], "mbnb");
        assert_eq!(sent[0]["filepath"], json!(fx.input.to_string_lossy()));
        assert_eq!(sent[0]["data"], "LOCUS       ECOLI\nORIGIN\n        1 acgt\n//\n");
        assert_eq!(wire.closes(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_pipeline_sends_nothing() {
        let fx = fixture();
        let (client, wire) = client(control_with(&["mbnb"]), &[EXIT]);

        let err = client.run(&session(&fx, "xyz", true)).await.unwrap_err();
        assert!(matches!(
            err,
            SeqpipeError::UnsupportedPipeline { ref requested, .. } if requested == "xyz"
        ));
        assert!(wire.sent().is_empty());
        assert_eq!(wire.closes(), 1);
        assert!(!fx.dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_pipeline_match_is_exact() {
        let fx = fixture();
        let (client, wire) = client(control_with(&["mbnb"]), &[EXIT]);

        let result = client.run(&session(&fx, "MBNB", false)).await;
        assert!(matches!(result, Err(SeqpipeError::UnsupportedPipeline { .. })));
        assert!(wire.sent().is_empty());
    }

    #[tokio::test]
    async fn test_stage_results_are_persisted_per_input() {
        let fx = fixture();
        let (client, wire) = client(
            control_with(&["mbnb"]),
            &[
                r#"{"type":"stage-complete","payload":{"stage":"align","timeTaken":1500,"result":"ACGT","cached":false}}"#,
                r#"{"type":"stage-complete","payload":{"stage":"tree","result":{"topology":[1,2]},"cached":true}}"#,
                EXIT,
            ],
        );

        let report = client.run(&session(&fx, "mbnb", true)).await.unwrap();
        let run_dir = fx.dir.path().join("out").join("ecoli.gb");
        assert_eq!(report.output_dir.as_deref(), Some(run_dir.as_path()));
        assert_eq!(report.stages.completed, vec!["align", "tree"]);
        assert_eq!(report.stages.cached, 1);

        assert_eq!(fs::read_to_string(run_dir.join("align")).unwrap(), "ACGT\n");
        let tree = fs::read_to_string(run_dir.join("tree")).unwrap();
        assert_eq!(tree, "{\n\t\"topology\": [\n\t\t1,\n\t\t2\n\t]\n}\n");
        assert_eq!(wire.closes(), 1);
    }

    #[tokio::test]
    async fn test_server_error_ends_session_without_raising() {
        let fx = fixture();
        let (client, wire) = client(
            control_with(&["mbnb"]),
            &[
                r#"{"type":"error","payload":{"error":"boom"}}"#,
                r#"{"type":"stage-complete","payload":{"stage":"align","result":"ACGT"}}"#,
            ],
        );

        let report = client.run(&session(&fx, "mbnb", true)).await.unwrap();
        assert_eq!(report.outcome, SessionOutcome::ServerError("boom".to_string()));
        assert!(!fx.dir.path().join("out/ecoli.gb/align").exists());
        assert_eq!(wire.closes(), 1);
        assert!(report.into_result().is_err());
    }

    #[tokio::test]
    async fn test_unknown_messages_are_skipped() {
        let fx = fixture();
        let (client, _wire) = client(
            control_with(&["mbnb"]),
            &[r#"{"type":"progress","payload":{"pct":10}}"#, "garbage", EXIT],
        );

        let report = client.run(&session(&fx, "mbnb", false)).await.unwrap();
        assert!(report.is_success());
        assert_eq!(report.stages.skipped, 2);
    }

    #[tokio::test]
    async fn test_disconnect_before_exit_is_connection_error() {
        let fx = fixture();
        let (client, wire) = client(
            control_with(&["mbnb"]),
            &[r#"{"type":"stage-start","payload":{"stage":"align"}}"#],
        );

        let err = client.run(&session(&fx, "mbnb", false)).await.unwrap_err();
        assert_eq!(err.error_code(), "CONNECTION");
        assert_eq!(wire.closes(), 1);
    }

    #[tokio::test]
    async fn test_missing_input_closes_connection() {
        let fx = fixture();
        let (client, wire) = client(control_with(&["mbnb"]), &[EXIT]);
        let mut session = session(&fx, "mbnb", true);
        session.input = fx.dir.path().join("missing.fasta");

        let err = client.run(&session).await.unwrap_err();
        assert_eq!(err.path(), Some(session.input.as_path()));
        assert!(wire.sent().is_empty());
        assert_eq!(wire.closes(), 1);
    }

    #[tokio::test]
    async fn test_refused_connection_skips_control_plane() {
        let fx = fixture();
        let wire = Arc::new(Wire::default());
        let connector = ScriptedConnector {
            wire: wire.clone(),
            inbound: Vec::new(),
            refuse: true,
        };
        // No expectations: any control-plane call would panic
        let client = SessionClient::new(Arc::new(connector), Arc::new(MockControlPlane::new()));

        let err = client.run(&session(&fx, "mbnb", false)).await.unwrap_err();
        assert_eq!(err.error_code(), "CONNECTION");
        assert_eq!(wire.closes(), 0);
    }
}
