//! HTTP request handlers

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::server::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_seconds": state.started_at.elapsed().as_secs(),
        "rooms": state.hub.room_count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LogConfig, ServerConfig};
    use crate::hub::{ColorPalette, Hub};
    use std::sync::Arc;
    use std::time::Instant;

    fn test_state() -> AppState {
        AppState {
            hub: Arc::new(Hub::new()),
            palette: Arc::new(ColorPalette::new()),
            config: Config {
                server: ServerConfig {
                    port: 8080,
                    host: "127.0.0.1".to_string(),
                    cors_origins: vec![],
                    static_dir: "./static".to_string(),
                    default_room: "default".to_string(),
                },
                log: LogConfig {
                    level: "info".to_string(),
                    format: "pretty".to_string(),
                },
            },
            started_at: Instant::now(),
        }
    }

    #[tokio::test]
    async fn test_health_check_reports_rooms() {
        let state = test_state();
        let _ = state.hub.get_or_create("abc123");

        let Json(body) = health_check(State(state)).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["rooms"], 1);
    }
}
