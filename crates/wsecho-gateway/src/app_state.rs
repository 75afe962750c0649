//! Shared application state for the wsEcho gateway.
//!
//! Everything here is immutable after startup except the process-wide
//! sequence counter, which is atomic.

use std::sync::Arc;

use wsecho_core::error::Result;
use wsecho_core::SequenceCounter;

use crate::config::{GatewayConfig, SequenceScope};
use crate::policy::OriginGuard;
use crate::transport::heartbeat::HeartbeatConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    origins: OriginGuard,
    heartbeat: HeartbeatConfig,
    process_seq: Arc<SequenceCounter>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let origins = OriginGuard::new(&cfg.origins.allowed)?;
        let heartbeat = HeartbeatConfig::from_section(&cfg.gateway);

        tracing::info!(
            path = %cfg.gateway.path,
            origins = ?cfg.origins.allowed,
            idle_timeout_ms = cfg.gateway.idle_timeout_ms,
            ping_interval_ms = cfg.gateway.ping_interval_ms(),
            sequence_scope = ?cfg.gateway.sequence_scope,
            "gateway state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                origins,
                heartbeat,
                process_seq: Arc::new(SequenceCounter::new()),
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn origins(&self) -> &OriginGuard {
        &self.inner.origins
    }

    pub fn heartbeat(&self) -> HeartbeatConfig {
        self.inner.heartbeat
    }

    pub fn max_frame_bytes(&self) -> usize {
        self.inner.cfg.gateway.max_frame_bytes
    }

    /// Counter for a new session, per the configured scope.
    pub fn session_counter(&self) -> Arc<SequenceCounter> {
        match self.inner.cfg.gateway.sequence_scope {
            SequenceScope::Session => Arc::new(SequenceCounter::new()),
            SequenceScope::Process => Arc::clone(&self.inner.process_seq),
        }
    }
}
