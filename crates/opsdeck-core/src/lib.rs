//! # opsdeck-core
//!
//! Shared library for Opsdeck containing the event-stream wire codec, the
//! action catalog, and the application-facing event/intent types.
//!
//! This crate is used by the stream client and by anything that needs to
//! speak the gateway's frame format.  It has zero dependencies on sockets,
//! timers, or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! Opsdeck is a cluster-operations dashboard.  The interesting data — jobs,
//! allocations, evaluations, nodes, members — changes continuously, so the
//! dashboard does not poll.  Instead a gateway process pushes updates over a
//! single long-lived WebSocket, and the client subscribes to the resources it
//! is currently showing.
//!
//! This crate (`opsdeck-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – How messages travel over the socket.  Every message is
//!   one JSON object with two fields, `"Type"` and `"Payload"`, and the
//!   catalog of known type strings lives here too, including the whitelist of
//!   kinds that may be sent upstream.
//!
//! - **`domain`** – The application vocabulary: an [`Event`] is something the
//!   gateway told us, an [`Intent`] is something we want to tell the gateway,
//!   and an [`AppError`] is the payload the client attaches to the error
//!   events it raises itself when the stream breaks.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `opsdeck_core::Event` instead of `opsdeck_core::domain::action::Event`.
pub use domain::action::{AppError, ErrorSource, Event, Intent};
pub use protocol::frame::{decode_frame, encode_frame, Frame, ProtocolError};
