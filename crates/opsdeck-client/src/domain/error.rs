//! Failure taxonomy for a connection cycle.
//!
//! Exactly one [`Failure`] comes out of every established connection, no
//! matter which half of the stream died first.  The supervisor turns it into
//! an application-level error event via [`Failure::to_event`] so the rest of
//! the application learns about the outage the same way it learns about
//! everything else: as an [`Event`] on the dispatch sink.
//!
//! # Design rationale
//!
//! The three variants deliberately mirror the three ways a WebSocket session
//! ends from the client's point of view:
//!
//! - the handshake never completed ([`Failure::ConnectTimeout`]),
//! - the peer ended an established session ([`Failure::ClosedByPeer`]),
//! - anything else went wrong on the wire ([`Failure::Transport`]).
//!
//! Downstream consumers only ever see the `source` tag of the resulting
//! event, so finer-grained variants would buy nothing.

use std::time::Duration;

use opsdeck_core::domain::action::{AppError, ErrorSource, Event};
use thiserror::Error;

/// Human-readable guidance attached to peer-initiated closes.
///
/// Shown verbatim in the dashboard's error banner, so it speaks to the
/// operator rather than the developer.
pub const DISCONNECT_NOTICE: &str = "The connection to the gateway was \
    closed. A new connection will be attempted shortly; live updates resume \
    automatically once it is re-established.";

/// Why a connection attempt or an established connection ended.
///
/// ```rust
/// use opsdeck_client::domain::Failure;
///
/// let failure = Failure::Transport { detail: "inbound frame rejected".into() };
/// assert_eq!(failure.to_string(), "transport fault: inbound frame rejected");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Failure {
    /// The WebSocket handshake did not complete within the configured limit.
    #[error("connect not acknowledged within {limit:?}")]
    ConnectTimeout { limit: Duration },

    /// The peer closed an established connection, optionally saying why.
    #[error("connection closed by peer")]
    ClosedByPeer { reason: Option<String> },

    /// The transport failed: a read or write error, an undecodable inbound
    /// frame, or a frame kind the stream protocol does not allow.
    #[error("transport fault: {detail}")]
    Transport { detail: String },
}

impl Failure {
    /// Renders this failure as the application-level error event consumers
    /// receive on the dispatch sink.
    ///
    /// Peer closes are tagged `ws_onclose` and carry [`DISCONNECT_NOTICE`]
    /// as operator guidance; every other failure is tagged `ws_onerror` with
    /// no guidance text.  A close reason supplied by the peer is folded into
    /// the error text.
    pub fn to_event(&self) -> Event {
        let app_error = match self {
            Failure::ClosedByPeer { reason } => AppError {
                error: match reason {
                    Some(peer_reason) => format!("{self} ({peer_reason})"),
                    None => self.to_string(),
                },
                source: ErrorSource::PeerClose,
                reason: Some(DISCONNECT_NOTICE.to_string()),
            },
            Failure::ConnectTimeout { .. } | Failure::Transport { .. } => AppError {
                error: self.to_string(),
                source: ErrorSource::SocketError,
                reason: None,
            },
        };
        Event::from(app_error)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use opsdeck_core::domain::catalog;

    fn payload_of(event: &Event) -> AppError {
        serde_json::from_value(event.payload.clone()).unwrap()
    }

    #[test]
    fn test_connect_timeout_display_includes_limit() {
        let failure = Failure::ConnectTimeout {
            limit: Duration::from_millis(2000),
        };
        assert_eq!(failure.to_string(), "connect not acknowledged within 2s");
    }

    #[test]
    fn test_every_failure_becomes_an_app_error_event() {
        let failures = [
            Failure::ConnectTimeout {
                limit: Duration::from_secs(2),
            },
            Failure::ClosedByPeer { reason: None },
            Failure::Transport {
                detail: "broken pipe".into(),
            },
        ];

        for failure in failures {
            assert_eq!(failure.to_event().kind, catalog::APP_ERROR);
        }
    }

    #[test]
    fn test_peer_close_maps_to_ws_onclose_with_notice() {
        // Arrange
        let failure = Failure::ClosedByPeer { reason: None };

        // Act
        let payload = payload_of(&failure.to_event());

        // Assert
        assert_eq!(payload.source, ErrorSource::PeerClose);
        assert_eq!(payload.reason.as_deref(), Some(DISCONNECT_NOTICE));
        assert_eq!(payload.error, "connection closed by peer");
    }

    #[test]
    fn test_peer_close_reason_is_folded_into_error_text() {
        let failure = Failure::ClosedByPeer {
            reason: Some("going away".into()),
        };

        let payload = payload_of(&failure.to_event());

        assert_eq!(payload.error, "connection closed by peer (going away)");
        // The guidance text is unaffected by the peer's reason.
        assert_eq!(payload.reason.as_deref(), Some(DISCONNECT_NOTICE));
    }

    #[test]
    fn test_transport_fault_maps_to_ws_onerror_without_guidance() {
        let failure = Failure::Transport {
            detail: "inbound frame rejected".into(),
        };

        let payload = payload_of(&failure.to_event());

        assert_eq!(payload.source, ErrorSource::SocketError);
        assert_eq!(payload.reason, None);
        assert_eq!(payload.error, "transport fault: inbound frame rejected");
    }

    #[test]
    fn test_connect_timeout_maps_to_ws_onerror() {
        let failure = Failure::ConnectTimeout {
            limit: Duration::from_secs(2),
        };

        let payload = payload_of(&failure.to_event());

        assert_eq!(payload.source, ErrorSource::SocketError);
        assert_eq!(payload.reason, None);
    }
}
