//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use wsecho_core::error::{Result, WsEchoError};

pub use schema::{GatewayConfig, GatewaySection, OriginSection, SequenceScope};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "WSECHO_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "wsecho.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        WsEchoError::Internal(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| WsEchoError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve config from `WSECHO_CONFIG`, else `wsecho.yaml`, else defaults.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_from_env() -> Result<GatewayConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_from_file(path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        Err(_) => {
            tracing::info!("no {DEFAULT_CONFIG_PATH} found, using built-in defaults");
            let cfg = GatewayConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
