//! Transport layer (WebSocket).
//!
//! Exposes the upgrade handler, the per-connection session loop, and the
//! heartbeat machinery it runs alongside.

pub mod heartbeat;
pub mod session;
pub mod writer;
pub mod ws;
