//! Axum router wiring (HTTP -> WS upgrade).
//!
//! The upgrade route accepts every method so non-GET requests get a 405 from
//! the handler itself; any other path falls through to the home handler.

use axum::{routing::any, Router};

use crate::{app_state::AppState, transport};

pub const HOME_BODY: &str = "Welcome to the WebSocket server!";

pub fn build_router(state: AppState) -> Router {
    let path = state.cfg().gateway.path.clone();
    Router::new()
        .route(&path, any(transport::ws::ws_upgrade))
        .fallback(home)
        .with_state(state)
}

async fn home() -> &'static str {
    HOME_BODY
}
