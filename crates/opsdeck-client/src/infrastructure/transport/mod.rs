//! Transport adapters: who actually moves the frames.
//!
//! Both modules implement the ports in [`crate::application::transport`]:
//!
//! - **`websocket`** – the real transport, a WebSocket over
//!   `tokio-tungstenite`.
//! - **`mock`** – an in-memory transport with scripted connect outcomes and
//!   a hand-driven peer, for tests.

pub mod mock;
pub mod websocket;

pub use mock::{MockConnector, MockPeer};
pub use websocket::WsConnector;
