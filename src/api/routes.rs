//! Route definitions

use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use super::handlers;
use super::server::AppState;
use super::websocket;

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let index = ServeFile::new(Path::new(&static_dir).join("index.html"));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // WebSocket endpoints (default room, then room-addressed)
        .route("/ws", get(websocket::canvas::canvas_ws_default))
        .route("/ws/:room_id", get(websocket::canvas::canvas_ws))
        // The client page, also served per-room so links can be shared
        .route_service("/", index.clone())
        .route_service("/room/:room_id", index)
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}
