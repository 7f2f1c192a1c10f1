//! Stream client configuration types.
//!
//! [`ClientConfig`] is the single source of truth for all runtime settings.
//! It can be constructed from a TOML document (`ClientConfig::from_toml`,
//! every field optional), from CLI arguments (done in `main.rs`), or from
//! sensible defaults (useful for local development and tests).
//!
//! # Design rationale
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) makes the client easy to embed in tests
//! and other binaries.  The composition root is responsible for populating
//! the struct from CLI args, environment variables, or a file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed request path on the gateway.
///
/// The gateway multiplexes every resource over this single stream; there is
/// no per-resource path.
pub const STREAM_PATH: &str = "/ws";

/// Default gateway port for development setups, matching the dev server.
pub const DEFAULT_DEV_PORT: u16 = 3000;

/// Where the gateway lives and how to address it.
///
/// Two shapes exist in the wild:
///
/// - **Development**: the dashboard and the gateway run on different ports,
///   so the endpoint is `<host>:<port>` with an explicit port.
/// - **Packaged**: the gateway serves the dashboard itself, so the endpoint
///   is the origin as-is and no port is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Use `wss://` instead of `ws://`.
    #[serde(default)]
    pub secure: bool,
    /// Gateway hostname, or the full authority when `port` is `None`.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port appended to the host; `None` means the host already is the full
    /// authority (packaged deployments).
    #[serde(default = "default_port")]
    pub port: Option<u16>,
}

impl Endpoint {
    /// A development endpoint: plain `ws://` with an explicit port.
    pub fn development(host: impl Into<String>, port: u16) -> Self {
        Self {
            secure: false,
            host: host.into(),
            port: Some(port),
        }
    }

    /// A packaged-deployment endpoint: the host string is the full
    /// authority, no port is appended.
    pub fn origin(host: impl Into<String>, secure: bool) -> Self {
        Self {
            secure,
            host: host.into(),
            port: None,
        }
    }

    /// The `host[:port]` part of the URL.
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// The full stream URL.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opsdeck_client::domain::Endpoint;
    ///
    /// assert_eq!(Endpoint::default().url(), "ws://localhost:3000/ws");
    /// assert_eq!(
    ///     Endpoint::origin("deck.example.com", true).url(),
    ///     "wss://deck.example.com/ws",
    /// );
    /// ```
    pub fn url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}{}", scheme, self.authority(), STREAM_PATH)
    }
}

impl Default for Endpoint {
    /// Local development against a gateway on port 3000.
    fn default() -> Self {
        Self::development(default_host(), DEFAULT_DEV_PORT)
    }
}

/// All runtime configuration for the stream client.
///
/// | Field                | Default                |
/// |----------------------|------------------------|
/// | endpoint             | `ws://localhost:3000`  |
/// | connect_timeout_ms   | 2000                   |
/// | retry_delay_ms       | 5000                   |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Gateway endpoint.
    #[serde(default)]
    pub endpoint: Endpoint,
    /// How long the WebSocket handshake may take before the attempt fails
    /// with a connect timeout.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Fixed pause between a connection cycle ending and the next connect
    /// attempt.  No exponential backoff: the gateway is assumed to be a
    /// co-located, quickly-recovering process.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl ClientConfig {
    /// Handshake timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Reconnect backoff as a [`Duration`].
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Parses a TOML document into a config.
    ///
    /// Every field is optional; omitted fields take their defaults, so an
    /// empty document yields [`ClientConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns the TOML parse error if the document is syntactically invalid
    /// or a field has the wrong type.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

// ── Serde default helpers ─────────────────────────────────────────────────────

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> Option<u16> {
    Some(DEFAULT_DEV_PORT)
}

fn default_connect_timeout_ms() -> u64 {
    2000
}

fn default_retry_delay_ms() -> u64 {
    5000
}

// ── Tests ─────────────────────────────────────────────────────────────────────
