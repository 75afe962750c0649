//! WebSocket upgrade handler.
//!
//! Order of checks, all before any session exists:
//! 1. method must be GET (405 otherwise)
//! 2. `Origin` must be on the allow-list (403 otherwise, logged)
//! 3. the handshake headers must be valid (axum's rejection, logged)
//!
//! On success the inbound message and frame limits are applied and the
//! connection is handed to [`Session`].

use std::net::SocketAddr;

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocketUpgrade},
        ConnectInfo, State,
    },
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use wsecho_core::error::{ClientCode, WsEchoError};

use crate::app_state::AppState;
use crate::transport::session::Session;

// --------------------
// Pre-upgrade rejections
// --------------------
fn reject(err: WsEchoError) -> Response {
    let status = match err.client_code() {
        ClientCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ClientCode::Forbidden => StatusCode::FORBIDDEN,
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::Timeout | ClientCode::Transport | ClientCode::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status == StatusCode::METHOD_NOT_ALLOWED {
        return (status, [(header::ALLOW, "GET")], err.to_string()).into_response();
    }
    (status, err.to_string()).into_response()
}

// --------------------
// Entry
// --------------------
pub async fn ws_upgrade(
    State(app): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if method != Method::GET {
        return reject(WsEchoError::MethodNotAllowed);
    }

    let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());
    if !app.origins().admit(origin, uri.path()).is_allowed() {
        return reject(WsEchoError::OriginRejected);
    }

    let upgrade = match upgrade {
        Ok(u) => u,
        Err(rejection) => {
            tracing::warn!(%remote, ?rejection, "upgrade error");
            return rejection.into_response();
        }
    };

    let session = Session::new(remote, app.heartbeat(), app.session_counter());
    let max = app.max_frame_bytes();

    upgrade
        .max_message_size(max)
        .max_frame_size(max)
        .on_failed_upgrade(move |e| {
            tracing::warn!(%remote, error = %e, "upgrade error");
        })
        .on_upgrade(move |socket| async move {
            session.run(socket).await;
        })
}
