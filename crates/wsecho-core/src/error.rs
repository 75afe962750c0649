//! Shared error type across wsEcho crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message or config.
    BadRequest,
    /// Upgrade attempted with a method other than GET.
    MethodNotAllowed,
    /// Declared origin is not on the allow-list.
    Forbidden,
    /// Read or write deadline elapsed.
    Timeout,
    /// Connection-level failure (peer gone, protocol error).
    Transport,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and HTTP bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ClientCode::Forbidden => "FORBIDDEN",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::Transport => "TRANSPORT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WsEchoError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum WsEchoError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("origin not allowed")]
    OriginRejected,
    #[error("{0} deadline elapsed")]
    Timeout(&'static str),
    #[error("transport: {0}")]
    Transport(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl WsEchoError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            WsEchoError::BadRequest(_) => ClientCode::BadRequest,
            WsEchoError::MethodNotAllowed => ClientCode::MethodNotAllowed,
            WsEchoError::OriginRejected => ClientCode::Forbidden,
            WsEchoError::Timeout(_) => ClientCode::Timeout,
            WsEchoError::Transport(_) => ClientCode::Transport,
            WsEchoError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            WsEchoError::Internal(_) => ClientCode::Internal,
        }
    }
}
