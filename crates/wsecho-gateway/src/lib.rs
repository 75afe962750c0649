//! wsEcho gateway library entry.
//!
//! This crate wires config, origin policy, and the WebSocket transport into a
//! servable router. It is consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod policy;
pub mod router;
pub mod server;
pub mod transport;
