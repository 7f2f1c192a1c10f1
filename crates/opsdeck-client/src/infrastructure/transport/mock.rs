//! In-memory transport for tests: scripted connects, hand-driven peer.
//!
//! # Why a mock transport?
//!
//! The real transport needs a listening WebSocket gateway, and the behaviors
//! worth testing — refused connects, mid-stream faults, peer closes, the
//! timing of reconnect attempts — are exactly the ones that are awkward to
//! provoke from a real server.  The mock replaces the socket with a pair of
//! in-memory channels and puts the test in the gateway's chair.
//!
//! # Usage in tests
//!
//! ```ignore
//! let connector = MockConnector::new();
//! let mut peer = connector.queue_accept();          // next connect succeeds
//!
//! let handle = supervisor::start(connector.clone(), config, sink).await?;
//!
//! peer.push_event("FETCHED_JOBS", json!([]));       // gateway speaks
//! peer.fail("broken pipe");                          // gateway breaks
//! assert_eq!(connector.attempts(), 1);
//! ```
//!
//! # Scripting connect outcomes
//!
//! Each `queue_*` call scripts exactly one future connect attempt, consumed
//! in order.  An attempt with nothing scripted behaves like an unreachable
//! gateway: it sleeps through the handshake limit and reports a connect
//! timeout.  Under tokio's paused test clock that sleep resolves instantly,
//! so "the gateway stayed down" costs a test no wall time.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio::time;

use crate::application::transport::{Connection, Connector, FrameSink, FrameSource};
use crate::domain::Failure;

enum ConnectOutcome {
    Accept(MockConnection),
    Refuse(Failure),
    Unreachable,
}

/// A connector that replays scripted connect outcomes.
///
/// Clones share the script and the attempt counter, so a test can keep one
/// clone for assertions after moving the other into the supervisor.
#[derive(Clone, Default)]
pub struct MockConnector {
    script: Arc<Mutex<VecDeque<ConnectOutcome>>>,
    attempts: Arc<AtomicUsize>,
}

impl MockConnector {
    /// Creates a connector with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful connect and returns the gateway side of it.
    pub fn queue_accept(&self) -> MockPeer {
        let (conn, peer) = MockConnection::pair();
        self.script
            .lock()
            .unwrap()
            .push_back(ConnectOutcome::Accept(conn));
        peer
    }

    /// Scripts a connect attempt that fails immediately.
    pub fn queue_refuse(&self, failure: Failure) {
        self.script
            .lock()
            .unwrap()
            .push_back(ConnectOutcome::Refuse(failure));
    }

    /// Scripts a connect attempt that hangs until the handshake limit fires.
    pub fn queue_unreachable(&self) {
        self.script
            .lock()
            .unwrap()
            .push_back(ConnectOutcome::Unreachable);
    }

    /// How many connect attempts have been made so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Conn = MockConnection;

    async fn connect(&self, limit: Duration) -> Result<MockConnection, Failure> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let outcome = self.script.lock().unwrap().pop_front();
        match outcome {
            Some(ConnectOutcome::Accept(conn)) => Ok(conn),
            Some(ConnectOutcome::Refuse(failure)) => Err(failure),
            Some(ConnectOutcome::Unreachable) | None => {
                time::sleep(limit).await;
                Err(Failure::ConnectTimeout { limit })
            }
        }
    }
}

/// The client side of one in-memory connection.
pub struct MockConnection {
    inbound: mpsc::UnboundedReceiver<Result<String, Failure>>,
    outbound: mpsc::UnboundedSender<String>,
}

impl MockConnection {
    /// Creates a connected (client, gateway) pair.
    pub fn pair() -> (MockConnection, MockPeer) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        (
            MockConnection {
                inbound: inbound_rx,
                outbound: outbound_tx,
            },
            MockPeer {
                inbound: inbound_tx,
                outbound: outbound_rx,
            },
        )
    }
}

impl Connection for MockConnection {
    type Source = MockFrameSource;
    type Sink = MockFrameSink;

    fn split(self) -> (MockFrameSource, MockFrameSink) {
        (
            MockFrameSource {
                inbound: self.inbound,
            },
            MockFrameSink {
                outbound: self.outbound,
            },
        )
    }
}

/// Inbound half of a mock connection.
pub struct MockFrameSource {
    inbound: mpsc::UnboundedReceiver<Result<String, Failure>>,
}

#[async_trait]
impl FrameSource for MockFrameSource {
    async fn next_frame(&mut self) -> Result<String, Failure> {
        match self.inbound.recv().await {
            Some(item) => item,
            // The peer handle was dropped without an explicit close.
            None => Err(Failure::ClosedByPeer { reason: None }),
        }
    }
}

/// Outbound half of a mock connection.
pub struct MockFrameSink {
    outbound: mpsc::UnboundedSender<String>,
}

#[async_trait]
impl FrameSink for MockFrameSink {
    async fn send_frame(&mut self, text: String) -> Result<(), Failure> {
        self.outbound.send(text).map_err(|_| Failure::Transport {
            detail: "peer hung up".to_string(),
        })
    }
}

/// The gateway side of one in-memory connection, driven by the test.
pub struct MockPeer {
    inbound: mpsc::UnboundedSender<Result<String, Failure>>,
    outbound: mpsc::UnboundedReceiver<String>,
}

impl MockPeer {
    /// Pushes one well-formed event frame to the client.
    pub fn push_event(&self, kind: &str, payload: Value) {
        self.push_text(json!({ "Type": kind, "Payload": payload }).to_string());
    }

    /// Pushes raw frame text, undecodable garbage included.
    pub fn push_text(&self, text: impl Into<String>) {
        // A peer writing into an already-dropped connection is a no-op,
        // just like writing into a closed socket from the far side.
        let _ = self.inbound.send(Ok(text.into()));
    }

    /// Fails the client's next read with a transport fault.
    pub fn fail(&self, detail: &str) {
        let _ = self.inbound.send(Err(Failure::Transport {
            detail: detail.to_string(),
        }));
    }

    /// Closes the connection without a close reason.
    pub fn close(&self) {
        let _ = self.inbound.send(Err(Failure::ClosedByPeer { reason: None }));
    }

    /// Closes the connection, giving the client a close reason.
    pub fn close_with(&self, reason: &str) {
        let _ = self.inbound.send(Err(Failure::ClosedByPeer {
            reason: Some(reason.to_string()),
        }));
    }

    /// Waits for the next frame the client transmits.
    pub async fn next_sent(&mut self) -> Option<String> {
        self.outbound.recv().await
    }

    /// The next transmitted frame, if one has already arrived.
    pub fn try_next_sent(&mut self) -> Option<String> {
        self.outbound.try_recv().ok()
    }

    /// All frames transmitted so far.
    pub fn drain_sent(&mut self) -> Vec<String> {
        let mut sent = Vec::new();
        while let Ok(text) = self.outbound.try_recv() {
            sent.push(text);
        }
        sent
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
