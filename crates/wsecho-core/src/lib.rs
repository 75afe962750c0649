//! wsEcho core: transport-agnostic reply logic, error types, and counters.
//!
//! This crate decides what to answer for each inbound text frame. It carries
//! no transport or runtime dependencies so the same rules can be exercised
//! directly from tests and reused behind any socket.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed client input becomes a reply, never a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod seq;

/// Shared result type.
pub use error::{Result, WsEchoError};
pub use seq::SequenceCounter;
