//! The dispatch sink: where decoded events leave the stream client.
//!
//! Everything the client has to say — gateway data and its own `APP_ERROR`
//! reports alike — goes through one [`DispatchSink`].  The trait is
//! deliberately synchronous and infallible-except-for-closure: delivery must
//! never apply backpressure to the reader, or a slow consumer would stall
//! the WebSocket and trip the gateway's keepalive.
//!
//! The canonical implementation is tokio's unbounded sender, so "the
//! consumer" is usually just a task on the other end of a channel.

use opsdeck_core::domain::action::Event;
use thiserror::Error;
use tokio::sync::mpsc;

/// The consumer side of the stream is gone and can never come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dispatch sink closed")]
pub struct SinkClosed;

/// Consumer-side port for decoded events.
///
/// Implementations must preserve ordering: events are handed over one at a
/// time, in arrival order, and the consumer must observe them that way.
#[cfg_attr(test, mockall::automock)]
pub trait DispatchSink: Send + Sync + 'static {
    /// Hands one event to the consumer.
    ///
    /// # Errors
    ///
    /// Returns [`SinkClosed`] when the consumer has gone away.  The stream
    /// machinery treats that as terminal: with nobody listening there is no
    /// point keeping the connection (or the supervisor) alive.
    fn dispatch(&self, event: Event) -> Result<(), SinkClosed>;
}

impl DispatchSink for mpsc::UnboundedSender<Event> {
    fn dispatch(&self, event: Event) -> Result<(), SinkClosed> {
        self.send(event).map_err(|_| SinkClosed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
