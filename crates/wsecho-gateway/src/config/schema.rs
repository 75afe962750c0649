use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use wsecho_core::error::{Result, WsEchoError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub origins: OriginSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            origins: OriginSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WsEchoError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.origins.validate()?;

        Ok(())
    }
}

/// Where the sequence counter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceScope {
    /// Fresh counter per connection.
    #[default]
    Session,
    /// One counter shared by every connection in the process.
    Process,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Defaults to 90% of `idle_timeout_ms`.
    #[serde(default)]
    pub ping_interval_ms: Option<u64>,

    #[serde(default = "default_write_wait_ms")]
    pub write_wait_ms: u64,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    #[serde(default)]
    pub sequence_scope: SequenceScope,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
            idle_timeout_ms: default_idle_timeout_ms(),
            ping_interval_ms: None,
            write_wait_ms: default_write_wait_ms(),
            max_frame_bytes: default_max_frame_bytes(),
            sequence_scope: SequenceScope::default(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.path.starts_with('/') || self.path == "/" {
            return Err(WsEchoError::BadRequest(
                "gateway.path must start with '/' and must not be the root path".into(),
            ));
        }
        if !(100..=600000).contains(&self.idle_timeout_ms) {
            return Err(WsEchoError::BadRequest(
                "gateway.idle_timeout_ms must be between 100 and 600000".into(),
            ));
        }
        let ping = self.ping_interval_ms();
        if ping == 0 || ping >= self.idle_timeout_ms {
            return Err(WsEchoError::BadRequest(
                "gateway.ping_interval_ms must be positive and less than idle_timeout_ms".into(),
            ));
        }
        if !(1..=60000).contains(&self.write_wait_ms) {
            return Err(WsEchoError::BadRequest(
                "gateway.write_wait_ms must be between 1 and 60000".into(),
            ));
        }
        if !(128..=1_048_576).contains(&self.max_frame_bytes) {
            return Err(WsEchoError::BadRequest(
                "gateway.max_frame_bytes must be between 128 and 1048576".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            WsEchoError::BadRequest(format!("gateway.listen is not a socket address: {e}"))
        })
    }

    pub fn ping_interval_ms(&self) -> u64 {
        self.ping_interval_ms.unwrap_or(self.idle_timeout_ms * 9 / 10)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_millis(self.ping_interval_ms())
    }

    pub fn write_wait(&self) -> Duration {
        Duration::from_millis(self.write_wait_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:4000".into()
}
fn default_path() -> String {
    "/ws".into()
}
fn default_idle_timeout_ms() -> u64 {
    30000
}
fn default_write_wait_ms() -> u64 {
    5000
}
fn default_max_frame_bytes() -> usize {
    4096
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OriginSection {
    #[serde(default = "default_allowed_origins")]
    pub allowed: Vec<String>,
}

impl Default for OriginSection {
    fn default() -> Self {
        Self {
            allowed: default_allowed_origins(),
        }
    }
}

impl OriginSection {
    pub fn validate(&self) -> Result<()> {
        if self.allowed.is_empty() {
            return Err(WsEchoError::BadRequest("origins.allowed must not be empty".into()));
        }
        if self.allowed.iter().any(|o| o.trim().is_empty()) {
            return Err(WsEchoError::BadRequest(
                "origins.allowed entries must not be blank".into(),
            ));
        }
        Ok(())
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:4000".into()]
}
