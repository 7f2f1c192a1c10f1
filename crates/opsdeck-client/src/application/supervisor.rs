//! Connection supervisor: the connect → run → report → wait loop.
//!
//! # Lifecycle
//!
//! ```text
//!  start ──► connect ──► run both halves ──► report APP_ERROR ──► wait
//!              ▲   (first failure caller's)        │                │
//!              └───────────────────────────────────┴────────────────┘
//! ```
//!
//! [`start`] performs the first connect inline so a misconfigured endpoint
//! fails the caller immediately instead of festering inside a background
//! task.  After that the supervisor owns the stream: whenever a cycle ends —
//! connection failed, peer closed, transport fault, even a failed reconnect
//! attempt — it reports exactly one `APP_ERROR` event on the dispatch sink,
//! waits out the retry delay, and connects again.  There is no retry limit;
//! the supervisor only stops when the consumer goes away or the
//! [`StreamHandle`] shuts it down.
//!
//! The intent intake queue lives here, not in a connection, which is what
//! carries queued subscriptions across reconnects.

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{info, warn};

use opsdeck_core::Intent;

use crate::application::reader::InboundReader;
use crate::application::sink::DispatchSink;
use crate::application::transport::{Connection, Connector};
use crate::application::writer::OutboundWriter;
use crate::domain::{ClientConfig, Failure};

/// The supervisor is no longer running, so intents have nowhere to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stream supervisor stopped")]
pub struct StreamStopped;

/// Owner's handle to a running stream.
///
/// Dropping the handle stops the supervisor and the connection with it.
#[derive(Debug)]
pub struct StreamHandle {
    intents: mpsc::UnboundedSender<Intent>,
    supervisor: JoinHandle<()>,
}

impl StreamHandle {
    /// Queues one intent for transmission.
    ///
    /// Queued intents survive reconnects: when no connection is live the
    /// intent simply waits in the intake queue for the next cycle's writer.
    /// Whether it then reaches the wire is still subject to the outbound
    /// whitelist.
    ///
    /// # Errors
    ///
    /// Returns [`StreamStopped`] when the supervisor is no longer running.
    pub fn enqueue(&self, intent: Intent) -> Result<(), StreamStopped> {
        self.intents.send(intent).map_err(|_| StreamStopped)
    }

    /// A cloneable intake handle for collaborators that queue intents
    /// without owning the stream.
    pub fn intents(&self) -> mpsc::UnboundedSender<Intent> {
        self.intents.clone()
    }

    /// `false` once the supervisor has stopped, either because the dispatch
    /// sink closed or because it was shut down.
    pub fn is_running(&self) -> bool {
        !self.supervisor.is_finished()
    }

    /// Stops the supervisor, dropping the live connection if there is one.
    pub fn shutdown(&self) {
        self.supervisor.abort();
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.supervisor.abort();
    }
}

/// Connects to the gateway and hands the stream over to the supervisor.
///
/// The first connect happens on the caller's future; only once it succeeds
/// is the supervisor spawned.  From then on connection failures are reported
/// as `APP_ERROR` events instead of errors.
///
/// # Errors
///
/// Returns the [`Failure`] of the first connect attempt.  No retry is made
/// for it and nothing is dispatched to the sink.
pub async fn start<C, S>(
    connector: C,
    config: ClientConfig,
    sink: S,
) -> Result<StreamHandle, Failure>
where
    C: Connector,
    S: DispatchSink,
{
    let first = connector.connect(config.connect_timeout()).await?;
    info!(url = %config.endpoint.url(), "stream connected");

    let (intents, intake) = mpsc::unbounded_channel();
    let supervisor = tokio::spawn(supervise(connector, config, sink, intake, first));

    Ok(StreamHandle { intents, supervisor })
}

/// The supervision loop.  Runs until the dispatch sink closes.
async fn supervise<C, S>(
    connector: C,
    config: ClientConfig,
    sink: S,
    mut intake: mpsc::UnboundedReceiver<Intent>,
    first: C::Conn,
) where
    C: Connector,
    S: DispatchSink,
{
    let mut cycle: u64 = 1;
    let mut live = Some(first);

    loop {
        let failure = match live.take() {
            Some(conn) => run_connection(conn, &sink, &mut intake).await,
            None => match connector.connect(config.connect_timeout()).await {
                Ok(conn) => {
                    cycle += 1;
                    info!(cycle, url = %config.endpoint.url(), "stream reconnected");
                    live = Some(conn);
                    continue;
                }
                Err(failure) => failure,
            },
        };

        warn!(cycle, %failure, "connection cycle ended");
        if sink.dispatch(failure.to_event()).is_err() {
            info!("dispatch sink closed, supervisor stopping");
            break;
        }

        time::sleep(config.retry_delay()).await;
    }
}

/// Runs one established connection until either half fails.
async fn run_connection<N, S>(
    conn: N,
    sink: &S,
    intake: &mut mpsc::UnboundedReceiver<Intent>,
) -> Failure
where
    N: Connection,
    S: DispatchSink,
{
    let (inbound, outbound) = conn.split();
    let reader = InboundReader::new(inbound, sink);
    let writer = OutboundWriter::new(outbound, intake);

    // Both halves run as unspawned futures, so the loser of the race is
    // dropped and with it cancelled mid-await.  One failure per cycle:
    // whichever half dies first decides, the survivor never gets to report.
    tokio::select! {
        failure = reader.run() => failure,
        failure = writer.run() => failure,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
