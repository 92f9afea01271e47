//! Scrawl - Collaborative Whiteboard Server
//!
//! A real-time collaborative whiteboard server written in Rust.
//!
//! ## Features
//!
//! - Room-scoped drawing sessions with shared canvas state
//! - WebSocket fan-out with bounded per-connection queues (lossy under load)
//! - Full-state sync for late joiners
//! - Live roster with join/leave notices and per-user colors
//! - Server-authoritative sender identity on every message

pub mod api;
pub mod config;
pub mod error;
pub mod hub;
pub mod models;

pub use config::Config;
pub use error::{Result, ScrawlError};
pub use hub::Hub;
