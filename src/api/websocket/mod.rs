//! WebSocket handlers
//!
//! Each connection runs an inbound task and an outbound task bridged by a
//! bounded channel; producers enqueue with `try_send` so a slow consumer
//! drops messages instead of backing up the whole room.

pub mod canvas;

/// Maximum number of messages buffered per connection's outbound queue.
/// Sized to absorb short bursts, not sustained overload.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;
