//! Outbound writer: intents from the intake queue onto the wire.
//!
//! The writer is the gate between the application and the gateway.  Every
//! intent on the intake queue passes the outbound whitelist
//! ([`catalog::whitelisted`]) before it is encoded; kinds not on the list
//! are local concerns and are dropped without an error — the application is
//! free to run its whole action vocabulary through the queue and let the
//! writer sort out what the gateway should see.
//!
//! The intake queue itself is owned by the supervisor and merely borrowed
//! here, which is what lets queued intents survive a connection cycle: when
//! this writer dies with its connection, undrained intents stay in the queue
//! for the next cycle's writer.

use opsdeck_core::domain::catalog;
use opsdeck_core::{encode_frame, Frame, Intent};
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::transport::FrameSink;
use crate::domain::Failure;

/// Drains the intake queue into one connection's outbound half.
pub struct OutboundWriter<'a, T> {
    transport: T,
    intake: &'a mut mpsc::UnboundedReceiver<Intent>,
}

impl<'a, T> OutboundWriter<'a, T>
where
    T: FrameSink,
{
    /// Pairs a connection's outbound half with the shared intake queue.
    pub fn new(transport: T, intake: &'a mut mpsc::UnboundedReceiver<Intent>) -> Self {
        Self { transport, intake }
    }

    /// Runs until the connection dies, returning the failure that ended it.
    ///
    /// Waiting for the next intent is deliberately unbounded — a quiet
    /// outbound side is normal, and the inbound half keeps the connection
    /// honest in the meantime.
    pub async fn run(mut self) -> Failure {
        loop {
            let intent = match self.intake.recv().await {
                Some(intent) => intent,
                None => {
                    // Every intake handle is gone, so no intent can ever
                    // arrive again.  Park instead of failing: the stream
                    // stays useful for inbound events until the connection
                    // itself ends and cancellation tears this task down.
                    std::future::pending().await
                }
            };

            if !catalog::whitelisted(&intent.kind) {
                debug!(kind = %intent.kind, "intent kept local");
                continue;
            }

            let frame = Frame::from(intent);
            let text = match encode_frame(&frame) {
                Ok(text) => text,
                Err(e) => {
                    return Failure::Transport {
                        detail: format!("outbound frame rejected: {e}"),
                    }
                }
            };

            if let Err(failure) = self.transport.send_frame(text).await {
                return failure;
            }
            debug!(kind = %frame.kind, "intent transmitted");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;
    use tokio_test::{assert_pending, assert_ready, task};

    // ── Recording transport ───────────────────────────────────────────────────

    /// A frame sink that records every transmitted text.
    #[derive(Default)]
    struct RecordingWire {
        sent: Arc<Mutex<Vec<String>>>,
        should_fail: bool,
    }

    impl RecordingWire {
        fn sent_handle(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.sent)
        }
    }

    #[async_trait]
    impl FrameSink for RecordingWire {
        async fn send_frame(&mut self, text: String) -> Result<(), Failure> {
            if self.should_fail {
                return Err(Failure::Transport {
                    detail: "mock send failure".to_string(),
                });
            }
            self.sent.lock().unwrap().push(text);
            Ok(())
        }
    }

    // ── Whitelist filtering ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_whitelisted_intent_is_encoded_and_sent() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let wire = RecordingWire::default();
        let sent = wire.sent_handle();
        tx.send(Intent::bare(catalog::WATCH_JOBS)).unwrap();

        // Act – drive the writer until it parks waiting for the next intent.
        let mut run = task::spawn(OutboundWriter::new(wire, &mut rx).run());
        assert_pending!(run.poll());

        // Assert
        assert_eq!(
            *sent.lock().unwrap(),
            vec![r#"{"Type":"WATCH_JOBS","Payload":null}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_unlisted_intent_is_dropped_without_error() {
        // Arrange – a local-only action kind.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let wire = RecordingWire::default();
        let sent = wire.sent_handle();
        tx.send(Intent::bare(catalog::CLEAR_FILE_PATH)).unwrap();

        // Act
        let mut run = task::spawn(OutboundWriter::new(wire, &mut rx).run());
        assert_pending!(run.poll());

        // Assert – nothing on the wire, and the writer is still healthy.
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mixed_queue_transmits_only_whitelisted_kinds() {
        // Arrange – local kind, outbound kind, inbound-shaped kind.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let wire = RecordingWire::default();
        let sent = wire.sent_handle();
        tx.send(Intent::bare(catalog::CLEAR_RECEIVED_FILE_DATA)).unwrap();
        tx.send(Intent::bare(catalog::WATCH_NODES)).unwrap();
        tx.send(Intent::bare(catalog::FETCHED_JOBS)).unwrap();

        // Act
        let mut run = task::spawn(OutboundWriter::new(wire, &mut rx).run());
        assert_pending!(run.poll());

        // Assert – exactly the one whitelisted kind went out.
        assert_eq!(
            *sent.lock().unwrap(),
            vec![r#"{"Type":"WATCH_NODES","Payload":null}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_payload_travels_with_the_frame() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let wire = RecordingWire::default();
        let sent = wire.sent_handle();
        tx.send(Intent::new(catalog::WATCH_JOB, json!({ "id": "deploy-web" })))
            .unwrap();

        // Act
        let mut run = task::spawn(OutboundWriter::new(wire, &mut rx).run());
        assert_pending!(run.poll());

        // Assert
        assert_eq!(
            *sent.lock().unwrap(),
            vec![r#"{"Type":"WATCH_JOB","Payload":{"id":"deploy-web"}}"#.to_string()]
        );
    }

    // ── Terminal and parked states ────────────────────────────────────────────

    #[tokio::test]
    async fn test_send_failure_ends_the_run() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let wire = RecordingWire {
            should_fail: true,
            ..RecordingWire::default()
        };
        tx.send(Intent::bare(catalog::WATCH_JOBS)).unwrap();

        // Act
        let mut run = task::spawn(OutboundWriter::new(wire, &mut rx).run());
        let failure = assert_ready!(run.poll());

        // Assert
        assert_eq!(
            failure,
            Failure::Transport {
                detail: "mock send failure".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_undrained_intents_stay_queued_after_failure() {
        // Arrange – first send fails, second intent never gets drained.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let wire = RecordingWire {
            should_fail: true,
            ..RecordingWire::default()
        };
        tx.send(Intent::bare(catalog::WATCH_JOBS)).unwrap();
        tx.send(Intent::bare(catalog::WATCH_NODES)).unwrap();

        // Act
        let mut run = task::spawn(OutboundWriter::new(wire, &mut rx).run());
        assert_ready!(run.poll());
        drop(run);

        // Assert – the survivor is still there for the next cycle's writer.
        assert_eq!(rx.try_recv().unwrap().kind, "WATCH_NODES");
    }

    #[tokio::test]
    async fn test_writer_parks_when_intake_closes() {
        // Arrange – all senders gone before the writer ever polls.
        let (tx, mut rx) = mpsc::unbounded_channel::<Intent>();
        drop(tx);
        let wire = RecordingWire::default();

        // Act / Assert – parked, not failed: a writer with nothing to say is
        // not a broken writer.
        let mut run = task::spawn(OutboundWriter::new(wire, &mut rx).run());
        assert_pending!(run.poll());
        assert_pending!(run.poll());
    }
}
