//! Application actions: events in, intents out.
//!
//! Both directions of the stream share one shape — a kind string plus an
//! opaque JSON payload — because the gateway protocol itself is symmetric
//! (see [`crate::protocol::frame`]).  The types are kept separate anyway:
//! an [`Event`] is always something the gateway said, an [`Intent`] is
//! always something the application wants to say.  Keeping the direction in
//! the type stops a subscription request from ever being mistaken for
//! delivered data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog;

/// An application-consumable notification decoded from one inbound frame.
///
/// Events are immutable once created and flow in exactly one direction:
/// gateway → transport → reader → dispatch sink.  The payload is opaque to
/// the stream machinery; only the consumer interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Kind tag, e.g. `FETCHED_JOBS` (see [`catalog`]).
    pub kind: String,
    /// Opaque payload; `Value::Null` when the frame carried none.
    pub payload: Value,
}

impl Event {
    /// Creates an event from a kind and payload.
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

/// An application-originated request to watch, unwatch, or fetch a resource.
///
/// Intents are placed on the intake queue by UI collaborators and drained by
/// the outbound writer, which transmits only the kinds listed in
/// [`catalog::OUTBOUND_WHITELIST`]; everything else stays local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Kind tag, e.g. `WATCH_JOBS` (see [`catalog`]).
    pub kind: String,
    /// Opaque payload, e.g. the job ID for `WATCH_JOB`.
    pub payload: Value,
}

impl Intent {
    /// Creates an intent from a kind and payload.
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Creates an intent with no payload (`Value::Null`).
    ///
    /// Collection-level subscriptions (`WATCH_JOBS`, `WATCH_NODES`, ...)
    /// carry no payload.
    pub fn bare(kind: impl Into<String>) -> Self {
        Self::new(kind, Value::Null)
    }
}

/// Which socket-level handler a stream failure surfaced through.
///
/// The dashboard's error banner distinguishes "the server closed the
/// stream" from "the stream broke"; the variants serialize to the exact
/// strings the consumer keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSource {
    /// The peer closed the connection (gracefully or not).
    #[serde(rename = "ws_onclose")]
    PeerClose,
    /// A transport fault or handshake failure.
    #[serde(rename = "ws_onerror")]
    SocketError,
}

impl ErrorSource {
    /// The wire string for this source.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorSource::PeerClose => "ws_onclose",
            ErrorSource::SocketError => "ws_onerror",
        }
    }
}

/// Payload of the `APP_ERROR` events the stream client raises itself when a
/// connection cycle ends.
///
/// `error` is the failure detail; `reason` carries user-facing guidance and
/// is present only for [`ErrorSource::PeerClose`] failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppError {
    /// Failure detail (e.g. the transport error string).
    pub error: String,
    /// Which handler the failure came from.
    pub source: ErrorSource,
    /// Human-readable guidance, only for peer closes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<AppError> for Event {
    /// Wraps the payload into an `APP_ERROR` event ready for the dispatch
    /// sink.  The payload object is built by hand so the conversion cannot
    /// fail.
    fn from(err: AppError) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert("error".to_string(), Value::String(err.error));
        payload.insert(
            "source".to_string(),
            Value::String(err.source.as_str().to_string()),
        );
        if let Some(reason) = err.reason {
            payload.insert("reason".to_string(), Value::String(reason));
        }
        Event::new(catalog::APP_ERROR, Value::Object(payload))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
