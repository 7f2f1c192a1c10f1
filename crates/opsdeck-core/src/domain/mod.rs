//! Domain types for the Opsdeck event stream.
//!
//! This module contains the application vocabulary with no infrastructure
//! dependencies: no sockets, no timers, no async.  Everything here can be
//! constructed and inspected in a plain unit test.

/// Events, intents, and the application-error payload.
///
/// See [`action::Event`] and [`action::Intent`] for the two main types.
pub mod action;

/// Named kind constants and the outbound whitelist.
pub mod catalog;
