//! Domain types for the stream client.
//!
//! Pure data, no I/O: the endpoint/timing configuration and the failure
//! taxonomy that terminates a connection cycle.  The infrastructure layer is
//! responsible for populating [`config::ClientConfig`] from CLI arguments or
//! a config file.

pub mod config;
pub mod error;

pub use config::{ClientConfig, Endpoint};
pub use error::Failure;
