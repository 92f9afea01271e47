//! CORS configuration
//!
//! Browser clients fetch the page and assets from this server, so CORS only
//! matters for externally hosted clients; those get an explicit whitelist
//! rather than a wildcard.

use axum::http::header;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::debug;

/// Create a CORS layer with the specified allowed origins
///
/// With no origins configured, only localhost dev origins are allowed.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = if allowed_origins.is_empty() {
        debug!("CORS: no origins specified, allowing localhost only");
        vec![
            "http://localhost:8080".parse().unwrap(),
            "http://127.0.0.1:8080".parse().unwrap(),
        ]
    } else {
        debug!("CORS: allowing origins: {:?}", allowed_origins);
        allowed_origins.iter().filter_map(|o| o.parse().ok()).collect()
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
