//! Top-level facade crate for wsEcho.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use wsecho_core::*;
}

pub mod gateway {
    pub use wsecho_gateway::*;
}
