use crate::error::{Result, ScrawlError};
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP/WebSocket server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (default: 8080)
    pub port: u16,
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Allowed CORS origins (comma-separated, empty = localhost only)
    pub cors_origins: Vec<String>,
    /// Directory holding the static web client
    pub static_dir: String,
    /// Room key used when a connection supplies none
    pub default_room: String,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                port: get_env_or("SCRAWL_PORT", "8080").parse().map_err(|_| {
                    ScrawlError::InvalidConfig("SCRAWL_PORT must be a valid port number".into())
                })?,
                host: get_env_or("SCRAWL_HOST", "0.0.0.0"),
                cors_origins: get_env_or("CORS_ORIGINS", "")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                static_dir: get_env_or("SCRAWL_STATIC_DIR", "./static"),
                default_room: {
                    let room = get_env_or("SCRAWL_DEFAULT_ROOM", "default");
                    if room.trim().is_empty() {
                        return Err(ScrawlError::InvalidConfig(
                            "SCRAWL_DEFAULT_ROOM must not be blank".into(),
                        ));
                    }
                    room
                },
            },
            log: LogConfig {
                level: get_env_or("LOG_LEVEL", "info"),
                format: get_env_or("LOG_FORMAT", "pretty"),
            },
        })
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
