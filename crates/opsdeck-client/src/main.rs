//! Opsdeck stream client, entry point.
//!
//! This binary maintains the long-lived WebSocket event stream to an Opsdeck
//! gateway: it subscribes to the requested resources, logs every event the
//! gateway pushes, and self-heals the connection for as long as the process
//! runs.  It is both a working diagnostic tool (log what a gateway actually
//! streams) and the reference composition of the `opsdeck_client` library.
//!
//! # Usage
//!
//! ```text
//! opsdeck-client [OPTIONS]
//!
//! Options:
//!   --config <PATH>   TOML config file (flags below override it)
//!   --host <HOST>     Gateway hostname [default: localhost]
//!   --port <PORT>     Gateway port [default: 3000]
//!   --secure          Use wss:// instead of ws://
//!   --origin          Treat --host as the full authority; no port appended
//!   --watch <TOPIC>   Subscribe at startup, repeatable [default: jobs]
//! ```
//!
//! Watch topics: `jobs`, `allocs`, `allocs-shallow`, `evals`, `nodes`,
//! `members`, `cluster-statistics`.
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable         | Description                          |
//! |------------------|--------------------------------------|
//! | `OPSDECK_CONFIG` | Path to the TOML config file         |
//! | `OPSDECK_HOST`   | Gateway hostname                     |
//! | `OPSDECK_PORT`   | Gateway port                         |
//! | `OPSDECK_SECURE` | `true` to use wss://                 |
//! | `RUST_LOG`       | Log filter (default `info`)          |
//!
//! # Architecture overview
//!
//! ```text
//! Opsdeck gateway  (JSON frames over WebSocket, /ws)
//!       ↕
//! opsdeck-client   ← this process
//!   domain/          endpoint config, failure taxonomy
//!   application/     reader, writer, supervisor behind transport ports
//!   infrastructure/  tokio-tungstenite transport adapter
//!       ↓
//! dispatch sink → event printer (stand-in for a real dashboard consumer)
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use opsdeck_core::domain::catalog;
use opsdeck_core::{Event, Intent};

use opsdeck_client::application::supervisor;
use opsdeck_client::domain::ClientConfig;
use opsdeck_client::infrastructure::transport::WsConnector;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Opsdeck event-stream client.
///
/// Connects to an Opsdeck gateway, subscribes to cluster resources, and logs
/// the event stream until interrupted.
#[derive(Debug, Parser)]
#[command(
    name = "opsdeck-client",
    about = "Self-healing event-stream client for Opsdeck gateways",
    version
)]
struct Cli {
    /// Path to a TOML config file.
    ///
    /// Every field in the file is optional; the flags below override
    /// whatever the file says.
    #[arg(long, env = "OPSDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Gateway hostname.
    #[arg(long, env = "OPSDECK_HOST")]
    host: Option<String>,

    /// Gateway port.
    ///
    /// In development the dashboard and gateway run on different ports, so
    /// an explicit port is appended to the host.
    #[arg(long, env = "OPSDECK_PORT")]
    port: Option<u16>,

    /// Use `wss://` instead of `ws://`.
    #[arg(long, env = "OPSDECK_SECURE")]
    secure: bool,

    /// Treat `--host` as the full authority and append no port.
    ///
    /// This matches packaged deployments where the gateway serves the
    /// dashboard itself and the stream lives on the same origin.
    #[arg(long, conflicts_with = "port")]
    origin: bool,

    /// Resource collections to subscribe to at startup.  Repeatable.
    #[arg(long = "watch", value_name = "TOPIC", default_values_t = ["jobs".to_string()])]
    watch: Vec<String>,
}

impl Cli {
    /// Resolves the final configuration: config file first, flags on top.
    ///
    /// # Errors
    ///
    /// Returns an error if `--config` names a file that cannot be read or
    /// does not parse as a [`ClientConfig`] document.
    fn into_client_config(self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("could not read config file {}", path.display()))?;
                ClientConfig::from_toml(&text)
                    .with_context(|| format!("could not parse config file {}", path.display()))?
            }
            None => ClientConfig::default(),
        };

        if let Some(host) = self.host {
            config.endpoint.host = host;
        }
        if let Some(port) = self.port {
            config.endpoint.port = Some(port);
        }
        if self.secure {
            config.endpoint.secure = true;
        }
        if self.origin {
            // The host is the full authority; nothing gets appended.
            config.endpoint.port = None;
        }

        Ok(config)
    }
}

/// Maps a `--watch` topic to its collection-level subscription intent.
///
/// Item-level watches (single job, single allocation, ...) need resource IDs
/// and are driven by a consumer, not the command line.
fn watch_intent(topic: &str) -> Option<Intent> {
    let kind = match topic {
        "jobs" => catalog::WATCH_JOBS,
        "allocs" => catalog::WATCH_ALLOCS,
        "allocs-shallow" => catalog::WATCH_ALLOCS_SHALLOW,
        "evals" => catalog::WATCH_EVALS,
        "nodes" => catalog::WATCH_NODES,
        "members" => catalog::WATCH_MEMBERS,
        "cluster-statistics" => catalog::WATCH_CLUSTER_STATISTICS,
        _ => return None,
    };
    Some(Intent::bare(kind))
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised; the log level is controlled by
///    the `RUST_LOG` environment variable.
/// 2. CLI arguments are parsed with `clap` and resolved against the optional
///    config file into a [`ClientConfig`].
/// 3. An event printer task is spawned as the dispatch sink's consumer.
/// 4. [`supervisor::start`] connects to the gateway.  A failed first connect
///    ends the process here with a non-zero exit; anything after this point
///    is the supervisor's problem and surfaces as `APP_ERROR` events.
/// 5. The startup subscriptions are queued and the process waits for Ctrl+C.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `EnvFilter::try_from_default_env()` reads the `RUST_LOG` environment
    // variable.  If it is absent or invalid, we fall back to `info` level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let watch = cli.watch.clone();
    let config = cli.into_client_config()?;

    info!("Opsdeck stream client starting: gateway={}", config.endpoint.url());

    // ── Consumer side ─────────────────────────────────────────────────────────
    //
    // The dispatch sink is just the sending half of a channel; this task is
    // the consumer on the other end.  A real dashboard would feed its state
    // store here instead of the log.
    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<Event>();
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            if event.kind == catalog::APP_ERROR {
                warn!(payload = %event.payload, "stream error event");
            } else {
                info!(kind = %event.kind, "event");
            }
        }
    });

    // ── Connect and subscribe ─────────────────────────────────────────────────
    let connector = WsConnector::for_endpoint(&config.endpoint);
    let handle = supervisor::start(connector, config, events_tx)
        .await
        .context("initial connection to the gateway failed")?;

    for topic in &watch {
        match watch_intent(topic) {
            Some(intent) => handle.enqueue(intent)?,
            None => warn!(%topic, "unknown watch topic, skipping"),
        }
    }

    // ── Run until interrupted ─────────────────────────────────────────────────
    tokio::signal::ctrl_c()
        .await
        .context("could not listen for Ctrl+C")?;
    info!("received Ctrl+C, shutting down");

    // Stopping the supervisor drops the dispatch sink, which in turn ends
    // the printer's channel; awaiting it makes the shutdown orderly.
    handle.shutdown();
    let _ = printer.await;

    info!("Opsdeck stream client stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_watch_jobs_only() {
        // Arrange: parse with no arguments (all defaults apply)
        let cli = Cli::parse_from(["opsdeck-client"]);

        // Assert
        assert_eq!(cli.watch, vec!["jobs".to_string()]);
        assert!(cli.config.is_none());
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(!cli.secure);
        assert!(!cli.origin);
    }

    #[test]
    fn test_cli_watch_flags_accumulate() {
        let cli = Cli::parse_from(["opsdeck-client", "--watch", "jobs", "--watch", "nodes"]);
        assert_eq!(cli.watch, vec!["jobs".to_string(), "nodes".to_string()]);
    }

    #[test]
    fn test_cli_defaults_yield_default_config() {
        let cli = Cli::parse_from(["opsdeck-client"]);
        let config = cli.into_client_config().unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_cli_host_and_port_override_defaults() {
        // Arrange
        let cli = Cli::parse_from(["opsdeck-client", "--host", "10.0.0.5", "--port", "8080"]);

        // Act
        let config = cli.into_client_config().unwrap();

        // Assert
        assert_eq!(config.endpoint.url(), "ws://10.0.0.5:8080/ws");
    }

    #[test]
    fn test_cli_origin_mode_builds_portless_secure_url() {
        let cli = Cli::parse_from([
            "opsdeck-client",
            "--origin",
            "--host",
            "deck.example.com",
            "--secure",
        ]);
        let config = cli.into_client_config().unwrap();
        assert_eq!(config.endpoint.url(), "wss://deck.example.com/ws");
    }

    #[test]
    fn test_cli_origin_conflicts_with_port() {
        let result = Cli::try_parse_from(["opsdeck-client", "--origin", "--port", "80"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["opsdeck-client", "--config", "/no/such/file.toml"]);
        assert!(cli.into_client_config().is_err());
    }

    #[test]
    fn test_watch_intent_maps_known_topics() {
        // Arrange / Act / Assert
        let cases = [
            ("jobs", catalog::WATCH_JOBS),
            ("allocs", catalog::WATCH_ALLOCS),
            ("allocs-shallow", catalog::WATCH_ALLOCS_SHALLOW),
            ("evals", catalog::WATCH_EVALS),
            ("nodes", catalog::WATCH_NODES),
            ("members", catalog::WATCH_MEMBERS),
            ("cluster-statistics", catalog::WATCH_CLUSTER_STATISTICS),
        ];
        for (topic, kind) in cases {
            let intent = watch_intent(topic).unwrap();
            assert_eq!(intent.kind, kind, "topic {topic}");
            assert_eq!(intent.payload, serde_json::Value::Null);
        }
    }

    #[test]
    fn test_watch_intent_rejects_unknown_topic() {
        assert!(watch_intent("deployments").is_none());
        assert!(watch_intent("").is_none());
    }
}
