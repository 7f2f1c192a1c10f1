//! Inbound reader: one connection's frames, decoded and dispatched in order.
//!
//! The reader is the only component that consumes the [`FrameSource`] half
//! of a connection, so arrival order and dispatch order are the same thing —
//! there is no buffering, reordering, or concurrent decode between the
//! socket and the sink.
//!
//! A reader lives exactly as long as its connection.  [`InboundReader::run`]
//! never returns success: it loops until something terminal happens and
//! reports that as the connection cycle's [`Failure`].

use opsdeck_core::{decode_frame, Event};
use tracing::debug;

use crate::application::sink::DispatchSink;
use crate::application::transport::FrameSource;
use crate::domain::Failure;

/// Drains one connection's inbound half into the dispatch sink.
pub struct InboundReader<'a, R, S> {
    transport: R,
    sink: &'a S,
}

impl<'a, R, S> InboundReader<'a, R, S>
where
    R: FrameSource,
    S: DispatchSink,
{
    /// Pairs a connection's inbound half with the dispatch sink.
    pub fn new(transport: R, sink: &'a S) -> Self {
        Self { transport, sink }
    }

    /// Runs until the connection dies, returning the failure that ended it.
    ///
    /// Three things are terminal: the transport reporting a failure, an
    /// inbound frame that does not decode (the two sides disagree about the
    /// protocol, so skipping it would silently desynchronize the dashboard),
    /// and the dispatch sink closing (nobody is listening anymore).
    pub async fn run(mut self) -> Failure {
        loop {
            let text = match self.transport.next_frame().await {
                Ok(text) => text,
                Err(failure) => return failure,
            };

            let frame = match decode_frame(&text) {
                Ok(frame) => frame,
                Err(e) => {
                    return Failure::Transport {
                        detail: format!("inbound frame rejected: {e}"),
                    }
                }
            };

            let event = Event::from(frame);
            debug!(kind = %event.kind, "event received");

            if self.sink.dispatch(event).is_err() {
                return Failure::Transport {
                    detail: "dispatch sink closed".to_string(),
                };
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use crate::application::sink::{MockDispatchSink, SinkClosed};

    // ── Scripted transport ────────────────────────────────────────────────────

    /// A frame source that replays a fixed script, then reports a peer close.
    struct ScriptedFrames {
        script: VecDeque<Result<String, Failure>>,
    }

    impl ScriptedFrames {
        fn new(script: impl IntoIterator<Item = Result<String, Failure>>) -> Self {
            Self {
                script: script.into_iter().collect(),
            }
        }
    }

    #[async_trait]
    impl FrameSource for ScriptedFrames {
        async fn next_frame(&mut self) -> Result<String, Failure> {
            match self.script.pop_front() {
                Some(item) => item,
                None => Err(Failure::ClosedByPeer { reason: None }),
            }
        }
    }

    fn frame(kind: &str, payload: &str) -> Result<String, Failure> {
        Ok(format!(r#"{{"Type":"{kind}","Payload":{payload}}}"#))
    }

    // ── Ordering and decoding ─────────────────────────────────────────────────

    #[tokio::test]
    async fn test_events_dispatch_in_arrival_order() {
        // Arrange
        let source = ScriptedFrames::new([
            frame("FETCHED_JOBS", "[]"),
            frame("FETCHED_NODES", "[]"),
            frame("FETCHED_MEMBERS", "[]"),
        ]);
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

        // Act – the script ends with a peer close, which ends the run.
        let failure = InboundReader::new(source, &tx).run().await;

        // Assert
        assert_eq!(failure, Failure::ClosedByPeer { reason: None });
        assert_eq!(rx.try_recv().unwrap().kind, "FETCHED_JOBS");
        assert_eq!(rx.try_recv().unwrap().kind, "FETCHED_NODES");
        assert_eq!(rx.try_recv().unwrap().kind, "FETCHED_MEMBERS");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_decoded_payload_travels_with_the_event() {
        // Arrange
        let source = ScriptedFrames::new([frame("FETCHED_JOB", r#"{"ID":"deploy-web"}"#)]);
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

        // Act
        InboundReader::new(source, &tx).run().await;

        // Assert
        let event = rx.try_recv().unwrap();
        assert_eq!(event.payload["ID"], "deploy-web");
    }

    // ── Terminal conditions ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_transport_failure_ends_the_run_verbatim() {
        // Arrange
        let injected = Failure::Transport {
            detail: "broken pipe".to_string(),
        };
        let source = ScriptedFrames::new([Err(injected.clone())]);
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

        // Act
        let failure = InboundReader::new(source, &tx).run().await;

        // Assert – the failure passes through untouched, no events emitted.
        assert_eq!(failure, injected);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_undecodable_frame_is_fatal() {
        // Arrange – garbage first, a perfectly good frame behind it.
        let source = ScriptedFrames::new([
            Ok("not a frame".to_string()),
            frame("FETCHED_JOBS", "[]"),
        ]);
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

        // Act
        let failure = InboundReader::new(source, &tx).run().await;

        // Assert – the run ends before the good frame is ever read.
        assert!(matches!(
            failure,
            Failure::Transport { ref detail } if detail.starts_with("inbound frame rejected")
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_sink_ends_the_run() {
        // Arrange – the consumer refuses the very first event.
        let source = ScriptedFrames::new([frame("FETCHED_JOBS", "[]")]);
        let mut sink = MockDispatchSink::new();
        sink.expect_dispatch().times(1).returning(|_| Err(SinkClosed));

        // Act
        let failure = InboundReader::new(source, &sink).run().await;

        // Assert
        assert_eq!(
            failure,
            Failure::Transport {
                detail: "dispatch sink closed".to_string()
            }
        );
    }
}
