//! Policy layer (origin allow-list).
//!
//! Compiles the configured origin list once at startup into a read-only guard
//! that the upgrade handler consults before any session exists.

pub mod origin;

pub use origin::{OriginDecision, OriginGuard};
