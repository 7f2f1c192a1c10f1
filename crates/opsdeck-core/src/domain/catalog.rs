//! Catalog of action kinds and the outbound whitelist.
//!
//! Every kind tag the Opsdeck stream knows about lives here as a named
//! constant, grouped by resource.  Three namespaces overlap in one string
//! space:
//!
//! - `FETCHED_*` — inbound events pushed by the gateway.
//! - `WATCH_* / UNWATCH_* / FETCH_*` — outbound subscription intents.
//! - `CLEAR_*` — local-only actions that exist for the consumer's state
//!   machinery and must never reach the wire.
//!
//! [`OUTBOUND_WHITELIST`] is the single source of truth for which kinds the
//! writer may transmit.  It is a closed list on purpose: forgetting to add a
//! new kind here fails safe (the intent stays local) rather than leaking
//! unknown traffic to the gateway.

// ── Cluster statistics ────────────────────────────────────────────────────────

pub const WATCH_CLUSTER_STATISTICS: &str = "WATCH_CLUSTER_STATISTICS";
pub const FETCHED_CLUSTER_STATISTICS: &str = "FETCHED_CLUSTER_STATISTICS";
pub const UNWATCH_CLUSTER_STATISTICS: &str = "UNWATCH_CLUSTER_STATISTICS";

// ── Jobs ──────────────────────────────────────────────────────────────────────

pub const WATCH_JOBS: &str = "WATCH_JOBS";
pub const FETCHED_JOBS: &str = "FETCHED_JOBS";
pub const UNWATCH_JOBS: &str = "UNWATCH_JOBS";

pub const WATCH_JOB: &str = "WATCH_JOB";
pub const FETCHED_JOB: &str = "FETCHED_JOB";
pub const UNWATCH_JOB: &str = "UNWATCH_JOB";

// ── Members ───────────────────────────────────────────────────────────────────

pub const FETCHED_MEMBERS: &str = "FETCHED_MEMBERS";
pub const WATCH_MEMBERS: &str = "WATCH_MEMBERS";
pub const UNWATCH_MEMBERS: &str = "UNWATCH_MEMBERS";

pub const FETCHED_MEMBER: &str = "FETCHED_MEMBER";
pub const FETCH_MEMBER: &str = "FETCH_MEMBER";
pub const WATCH_MEMBER: &str = "WATCH_MEMBER";
pub const UNWATCH_MEMBER: &str = "UNWATCH_MEMBER";

// ── Nodes ─────────────────────────────────────────────────────────────────────

pub const WATCH_NODES: &str = "WATCH_NODES";
pub const FETCHED_NODES: &str = "FETCHED_NODES";
pub const UNWATCH_NODES: &str = "UNWATCH_NODES";

pub const FETCHED_NODE: &str = "FETCHED_NODE";
pub const FETCH_NODE: &str = "FETCH_NODE";
pub const WATCH_NODE: &str = "WATCH_NODE";
pub const UNWATCH_NODE: &str = "UNWATCH_NODE";

// ── Client statistics ─────────────────────────────────────────────────────────

pub const FETCH_CLIENT_STATS: &str = "FETCH_CLIENT_STATS";
pub const WATCH_CLIENT_STATS: &str = "WATCH_CLIENT_STATS";
pub const UNWATCH_CLIENT_STATS: &str = "UNWATCH_CLIENT_STATS";
pub const FETCHED_CLIENT_STATS: &str = "FETCHED_CLIENT_STATS";

// ── Evaluations ───────────────────────────────────────────────────────────────

pub const WATCH_EVALS: &str = "WATCH_EVALS";
pub const UNWATCH_EVALS: &str = "UNWATCH_EVALS";
pub const FETCHED_EVALS: &str = "FETCHED_EVALS";

pub const WATCH_EVAL: &str = "WATCH_EVAL";
pub const UNWATCH_EVAL: &str = "UNWATCH_EVAL";
pub const FETCHED_EVAL: &str = "FETCHED_EVAL";

// ── Allocations ───────────────────────────────────────────────────────────────

pub const WATCH_ALLOCS: &str = "WATCH_ALLOCS";
pub const WATCH_ALLOCS_SHALLOW: &str = "WATCH_ALLOCS_SHALLOW";
pub const FETCHED_ALLOCS: &str = "FETCHED_ALLOCS";
pub const UNWATCH_ALLOCS: &str = "UNWATCH_ALLOCS";
pub const UNWATCH_ALLOCS_SHALLOW: &str = "UNWATCH_ALLOCS_SHALLOW";

pub const FETCHED_ALLOC: &str = "FETCHED_ALLOC";
pub const WATCH_ALLOC: &str = "WATCH_ALLOC";
pub const UNWATCH_ALLOC: &str = "UNWATCH_ALLOC";

// ── Filesystem browsing ───────────────────────────────────────────────────────

pub const FETCH_DIR: &str = "FETCH_DIR";
pub const FETCHED_DIR: &str = "FETCHED_DIR";

pub const WATCH_FILE: &str = "WATCH_FILE";
pub const UNWATCH_FILE: &str = "UNWATCH_FILE";
pub const FETCHED_FILE: &str = "FETCHED_FILE";

// Local-only: reset the file browser between views.  Never transmitted.
pub const CLEAR_FILE_PATH: &str = "CLEAR_FILE_PATH";
pub const CLEAR_RECEIVED_FILE_DATA: &str = "CLEAR_RECEIVED_FILE_DATA";

// ── Errors ────────────────────────────────────────────────────────────────────

/// Raised by the gateway for server-side faults and by the stream client
/// itself for connection failures; also forwarded upstream when the consumer
/// reports an error.  Payload shape: [`crate::domain::action::AppError`].
pub const APP_ERROR: &str = "APP_ERROR";

// ── Outbound whitelist ────────────────────────────────────────────────────────

/// Intent kinds eligible for transmission to the gateway.
///
/// The outbound writer drops anything not listed here without sending it;
/// that is filtering, not an error.
pub const OUTBOUND_WHITELIST: &[&str] = &[
    WATCH_JOBS,
    UNWATCH_JOBS,
    WATCH_JOB,
    UNWATCH_JOB,
    WATCH_ALLOCS,
    WATCH_ALLOCS_SHALLOW,
    UNWATCH_ALLOCS,
    UNWATCH_ALLOCS_SHALLOW,
    WATCH_ALLOC,
    UNWATCH_ALLOC,
    WATCH_EVAL,
    UNWATCH_EVAL,
    WATCH_EVALS,
    UNWATCH_EVALS,
    WATCH_NODES,
    UNWATCH_NODES,
    WATCH_NODE,
    UNWATCH_NODE,
    FETCH_NODE,
    WATCH_MEMBERS,
    UNWATCH_MEMBERS,
    WATCH_MEMBER,
    UNWATCH_MEMBER,
    FETCH_MEMBER,
    FETCH_CLIENT_STATS,
    WATCH_CLIENT_STATS,
    UNWATCH_CLIENT_STATS,
    FETCH_DIR,
    WATCH_FILE,
    UNWATCH_FILE,
    APP_ERROR,
    WATCH_CLUSTER_STATISTICS,
    UNWATCH_CLUSTER_STATISTICS,
];

/// Returns `true` if intents of this kind may be sent to the gateway.
///
/// The whitelist is small (33 entries) and checked once per outbound intent,
/// so a linear scan over static strings beats building a set.
pub fn whitelisted(kind: &str) -> bool {
    OUTBOUND_WHITELIST.contains(&kind)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
