//! Infrastructure layer for the stream client.
//!
//! Contains the outward-facing adapters behind the application layer's
//! ports.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain`,
//! and `opsdeck_core`, but MUST NOT be imported by them.
//!
//! # Sub-modules
//!
//! - **`transport`** – implementations of the transport ports: the real
//!   WebSocket over `tokio-tungstenite`, and an in-memory scripted transport
//!   for tests.

pub mod transport;
