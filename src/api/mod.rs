//! HTTP/WebSocket server surface
//!
//! Serves the static client, a health endpoint, and the room WebSocket
//! upgrade paths.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod websocket;

pub use server::ApiServer;
