//! Transport ports: what the stream client needs from a WebSocket.
//!
//! The use cases never touch `tokio-tungstenite` directly.  They are written
//! against these four traits, and the infrastructure layer provides the real
//! WebSocket implementation ([`WsConnector`]) plus an in-memory one
//! ([`MockConnector`]) for tests.
//!
//! The shape mirrors how a duplex socket is actually used:
//!
//! - a [`Connector`] dials and yields a [`Connection`],
//! - the connection is split once into its two independent halves,
//! - the [`FrameSource`] half is owned by the inbound reader, the
//!   [`FrameSink`] half by the outbound writer.
//!
//! Splitting transfers ownership, so the type system already rules out two
//! tasks fighting over one half.
//!
//! [`WsConnector`]: crate::infrastructure::transport::websocket::WsConnector
//! [`MockConnector`]: crate::infrastructure::transport::mock::MockConnector

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Failure;

/// Dials the gateway and yields live connections.
///
/// The connector outlives individual connections: the supervisor keeps one
/// for the whole life of the stream and calls [`Connector::connect`] once
/// per cycle.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// The connection type this connector produces.
    type Conn: Connection;

    /// Opens one connection, completing the handshake within `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::ConnectTimeout`] when the handshake does not
    /// complete within `limit`, or [`Failure::Transport`] when it fails
    /// outright (refused, DNS, TLS, HTTP rejection).
    async fn connect(&self, limit: Duration) -> Result<Self::Conn, Failure>;
}

/// One established, not-yet-split connection.
pub trait Connection: Send + 'static {
    /// Inbound half handed to the reader.
    type Source: FrameSource;
    /// Outbound half handed to the writer.
    type Sink: FrameSink;

    /// Splits the connection into its two halves.
    fn split(self) -> (Self::Source, Self::Sink);
}

/// Inbound half of a connection: yields frame texts in arrival order.
#[async_trait]
pub trait FrameSource: Send + 'static {
    /// Waits for the next inbound frame's text.
    ///
    /// Transport-level control traffic (ping/pong) is handled below this
    /// port and never surfaces here.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::ClosedByPeer`] when the peer ends the connection
    /// and [`Failure::Transport`] for anything else; both are terminal for
    /// the connection.
    async fn next_frame(&mut self) -> Result<String, Failure>;
}

/// Outbound half of a connection: transmits frame texts.
#[async_trait]
pub trait FrameSink: Send + 'static {
    /// Transmits one frame's text.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::Transport`] when the frame cannot be written;
    /// terminal for the connection.
    async fn send_frame(&mut self, text: String) -> Result<(), Failure>;
}
