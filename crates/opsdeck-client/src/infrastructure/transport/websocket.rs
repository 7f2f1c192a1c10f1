//! The real transport: a WebSocket over `tokio-tungstenite`.
//!
//! Architecture:
//! - [`WsConnector`] dials the gateway's stream URL and applies the
//!   handshake timeout.
//! - [`WsConnection`] wraps the established socket and splits it into the
//!   two port halves.
//! - [`classify`] decides, per transport message, whether the stream sees
//!   frame text, nothing (keepalive noise), or the end of the connection.
//!
//! Only text messages carry protocol frames.  A binary message means the
//! peer is not an Opsdeck gateway, so it ends the connection rather than
//! being skipped.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::application::transport::{Connection, Connector, FrameSink, FrameSource};
use crate::domain::{Endpoint, Failure};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connector for the gateway's WebSocket stream.
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
}

impl WsConnector {
    /// A connector dialing the given stream URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// A connector for the configured endpoint.
    pub fn for_endpoint(endpoint: &Endpoint) -> Self {
        Self::new(endpoint.url())
    }
}

#[async_trait]
impl Connector for WsConnector {
    type Conn = WsConnection;

    async fn connect(&self, limit: Duration) -> Result<WsConnection, Failure> {
        match time::timeout(limit, connect_async(self.url.as_str())).await {
            Err(_) => Err(Failure::ConnectTimeout { limit }),
            Ok(Err(e)) => Err(Failure::Transport {
                detail: format!("handshake failed: {e}"),
            }),
            Ok(Ok((stream, _response))) => Ok(WsConnection { inner: stream }),
        }
    }
}

/// One established WebSocket, not yet split.
pub struct WsConnection {
    inner: WsStream,
}

impl Connection for WsConnection {
    type Source = WsFrameSource;
    type Sink = WsFrameSink;

    fn split(self) -> (WsFrameSource, WsFrameSink) {
        let (sink, stream) = self.inner.split();
        (WsFrameSource { stream }, WsFrameSink { sink })
    }
}

/// Inbound half: transport messages filtered down to frame texts.
pub struct WsFrameSource {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl FrameSource for WsFrameSource {
    async fn next_frame(&mut self) -> Result<String, Failure> {
        loop {
            let message = match self.stream.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    return Err(Failure::Transport {
                        detail: format!("read failed: {e}"),
                    })
                }
                // Stream exhausted without a close frame: the peer is gone.
                None => return Err(Failure::ClosedByPeer { reason: None }),
            };

            match classify(message) {
                Inbound::Frame(text) => return Ok(text),
                Inbound::Control => continue,
                Inbound::Terminal(failure) => return Err(failure),
            }
        }
    }
}

/// Outbound half: frame texts onto the wire.
pub struct WsFrameSink {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl FrameSink for WsFrameSink {
    async fn send_frame(&mut self, text: String) -> Result<(), Failure> {
        self.sink
            .send(Message::Text(text))
            .await
            .map_err(|e| Failure::Transport {
                detail: format!("write failed: {e}"),
            })
    }
}

/// What one transport message means to the stream.
#[derive(Debug)]
enum Inbound {
    /// Frame text for the codec.
    Frame(String),
    /// Keepalive traffic; tungstenite answers pings itself.
    Control,
    /// The connection is over.
    Terminal(Failure),
}

fn classify(message: Message) -> Inbound {
    match message {
        Message::Text(text) => Inbound::Frame(text),
        Message::Ping(_) | Message::Pong(_) => Inbound::Control,
        Message::Close(frame) => Inbound::Terminal(Failure::ClosedByPeer {
            // An empty close reason carries no information; treat it as
            // absent so it never pollutes the error text.
            reason: frame
                .map(|f| f.reason.into_owned())
                .filter(|reason| !reason.is_empty()),
        }),
        Message::Binary(_) => Inbound::Terminal(Failure::Transport {
            detail: "binary frame on a text protocol".to_string(),
        }),
        // Raw frames only surface when tungstenite's message assembly is
        // disabled, which this client never does.
        Message::Frame(_) => Inbound::Terminal(Failure::Transport {
            detail: "unexpected raw frame".to_string(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
