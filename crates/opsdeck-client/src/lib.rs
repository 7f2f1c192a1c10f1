//! opsdeck-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does opsdeck-client do? (for beginners)
//!
//! The Opsdeck dashboard does not poll the cluster.  Instead this client
//! holds one long-lived WebSocket to the Opsdeck gateway and keeps it
//! healthy for the lifetime of the process:
//!
//! 1. It connects to `/ws` (with a handshake timeout) and splits the socket
//!    into a read half and a write half.
//! 2. The **reader** decodes every inbound `{"Type", "Payload"}` frame into
//!    an [`opsdeck_core::Event`] and hands it to the dispatch sink in
//!    arrival order.
//! 3. The **writer** drains the intake queue of [`opsdeck_core::Intent`]s,
//!    drops anything not on the outbound whitelist, and sends the rest.
//! 4. The **supervisor** watches both; when either fails it tears the whole
//!    connection down, tells the sink once via an `APP_ERROR` event, waits
//!    out a fixed backoff, and dials again — forever.
//!
//! Intents queued while the stream is down are not lost: the intake queue
//! outlives individual connections and is drained by the next cycle's
//! writer.

/// Domain layer: configuration and the failure taxonomy.
pub mod domain;

/// Application layer: reader/writer/supervisor use cases and the port traits
/// they are generic over.
pub mod application;

/// Infrastructure layer: transport adapters (real WebSocket and in-memory
/// mock).
pub mod infrastructure;
