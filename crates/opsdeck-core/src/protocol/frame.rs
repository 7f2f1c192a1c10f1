//! JSON codec for the gateway's frame format.
//!
//! Wire format: one WebSocket text frame carries exactly one JSON object
//! with two fields:
//!
//! ```text
//! {"Type": "<kind>", "Payload": <any JSON value>}
//! ```
//!
//! No length prefix, no batching, no compression — one transport frame is
//! one message, in both directions.  `"Payload"` may be absent and decodes
//! as JSON null; `"Type"` is mandatory.  Unknown extra fields are ignored so
//! the gateway can grow its side of the protocol without breaking older
//! clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::action::{Event, Intent};

/// Errors that can occur during frame encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The text was not a well-formed `{"Type", "Payload"}` object.
    ///
    /// A malformed frame means the two sides disagree about the protocol,
    /// which is why the stream client treats this as terminal rather than
    /// skipping the frame.
    #[error("malformed frame: {0}")]
    Malformed(String),
}

/// One wire message: a kind tag plus an opaque payload.
///
/// The capitalized JSON keys (`"Type"`, `"Payload"`) are the gateway's
/// contract; the Rust field names stay idiomatic via serde renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Kind tag, e.g. `FETCHED_JOBS` or `WATCH_JOBS`.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Opaque payload; absent on the wire becomes `Value::Null`.
    #[serde(rename = "Payload", default)]
    pub payload: Value,
}

// An intent and its frame are field-for-field identical; only the direction
// differs.  There is deliberately no `Event -> Frame` conversion: events are
// never echoed back to the gateway.

impl From<Intent> for Frame {
    fn from(intent: Intent) -> Self {
        Self {
            kind: intent.kind,
            payload: intent.payload,
        }
    }
}

impl From<Frame> for Event {
    fn from(frame: Frame) -> Self {
        Event::new(frame.kind, frame.payload)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`Frame`] into the JSON text carried by one transport frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] if serialization fails (not
/// reachable for payloads built from [`Value`], but the signature keeps the
/// codec honest).
///
/// # Examples
///
/// ```rust
/// use opsdeck_core::{encode_frame, Frame};
/// use serde_json::Value;
///
/// let frame = Frame { kind: "WATCH_JOBS".to_string(), payload: Value::Null };
/// let text = encode_frame(&frame).unwrap();
/// assert_eq!(text, r#"{"Type":"WATCH_JOBS","Payload":null}"#);
/// ```
pub fn encode_frame(frame: &Frame) -> Result<String, ProtocolError> {
    serde_json::to_string(frame).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

/// Decodes the JSON text of one transport frame into a [`Frame`].
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] if the text is not valid JSON, is
/// not an object, or lacks a string `"Type"` field.
///
/// # Examples
///
/// ```rust
/// use opsdeck_core::decode_frame;
///
/// let frame = decode_frame(r#"{"Type":"FETCHED_JOBS","Payload":[]}"#).unwrap();
/// assert_eq!(frame.kind, "FETCHED_JOBS");
/// ```
pub fn decode_frame(text: &str) -> Result<Frame, ProtocolError> {
    serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
