//! Room-scoped broadcast engine
//!
//! The concurrency core: a process-wide registry of rooms, each owning its
//! membership and element log, fanning messages out to members' bounded
//! outbound queues. Locks nest Hub → Room → Client, in that order only.

pub mod client;
pub mod palette;
pub mod registry;
pub mod room;
pub mod router;

pub use client::{Client, ClientId, Delivery};
pub use palette::ColorPalette;
pub use registry::Hub;
pub use room::Room;
