//! Per-connection outbound queue and shutdown protocol
//!
//! A [`Client`] bridges room fan-out to one connection's outbound task.
//! Producers (broadcasts from any room member's inbound task) enqueue with a
//! non-blocking `try_send`; the single consumer is the connection's own
//! outbound task draining the paired receiver onto the socket.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

use crate::models::UserInfo;

/// Opaque membership handle, unique per connection for the process lifetime.
///
/// Rooms key membership by this handle rather than the (client-suppliable)
/// user-id string, so equality is by connection identity and removal is O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(u64);

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

impl ClientId {
    fn next() -> Self {
        ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Outcome of a non-blocking enqueue attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Queue full or connection closing; the payload is silently discarded
    Dropped,
}

/// Queue state guarded by the client's own lock.
///
/// The closing flag and the sender are flipped together in one critical
/// section so no enqueue can race a half-closed queue.
struct Outbound {
    closing: bool,
    tx: Option<mpsc::Sender<String>>,
}

/// One live connection's identity and outbound queue handle
pub struct Client {
    pub id: ClientId,
    pub user_id: String,
    pub color: String,
    outbound: Mutex<Outbound>,
}

impl Client {
    /// Create a client wrapping the send half of its bounded outbound queue
    pub fn new(user_id: String, color: String, tx: mpsc::Sender<String>) -> Self {
        Self {
            id: ClientId::next(),
            user_id,
            color,
            outbound: Mutex::new(Outbound {
                closing: false,
                tx: Some(tx),
            }),
        }
    }

    /// This client's roster entry
    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            id: self.user_id.clone(),
            color: self.color.clone(),
        }
    }

    /// Attempt to enqueue a pre-serialized payload without blocking.
    ///
    /// Reports [`Delivery::Dropped`] when the connection is closing or the
    /// queue is at capacity. Dropping is deliberate backpressure policy, not
    /// an error; callers never retry.
    pub fn try_enqueue(&self, payload: String) -> Delivery {
        let outbound = self.outbound.lock();
        if outbound.closing {
            return Delivery::Dropped;
        }
        match outbound.tx.as_ref() {
            Some(tx) => match tx.try_send(payload) {
                Ok(()) => Delivery::Delivered,
                Err(_) => Delivery::Dropped,
            },
            None => Delivery::Dropped,
        }
    }

    /// Begin shutdown: set the closing flag and close the queue atomically.
    ///
    /// Dropping the sender lets the outbound task finish draining queued
    /// payloads and then exit cleanly. Idempotent.
    pub fn close(&self) {
        let mut outbound = self.outbound.lock();
        outbound.closing = true;
        outbound.tx = None;
    }

    /// Whether teardown has begun
    pub fn is_closing(&self) -> bool {
        self.outbound.lock().closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(capacity: usize) -> (Client, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        let client = Client::new("alice".to_string(), "#e74c3c".to_string(), tx);
        (client, rx)
    }

    #[tokio::test]
    async fn test_enqueue_and_drain_preserves_order() {
        let (client, mut rx) = test_client(8);

        assert_eq!(client.try_enqueue("one".to_string()), Delivery::Delivered);
        assert_eq!(client.try_enqueue("two".to_string()), Delivery::Delivered);

        assert_eq!(rx.recv().await.unwrap(), "one");
        assert_eq!(rx.recv().await.unwrap(), "two");
    }

    #[tokio::test]
    async fn test_drop_under_load() {
        // With capacity C and no consumer, exactly the (C+1)th enqueue drops.
        let capacity = 4;
        let (client, mut rx) = test_client(capacity);

        for i in 0..capacity {
            assert_eq!(
                client.try_enqueue(format!("msg-{}", i)),
                Delivery::Delivered
            );
        }
        assert_eq!(client.try_enqueue("overflow".to_string()), Delivery::Dropped);

        // The first C payloads arrive in enqueue order.
        for i in 0..capacity {
            assert_eq!(rx.recv().await.unwrap(), format!("msg-{}", i));
        }
    }

    #[tokio::test]
    async fn test_no_send_after_close() {
        let (client, mut rx) = test_client(8);

        assert_eq!(client.try_enqueue("before".to_string()), Delivery::Delivered);
        client.close();
        assert!(client.is_closing());
        assert_eq!(client.try_enqueue("after".to_string()), Delivery::Dropped);

        // Consumer drains what was queued, then sees closure.
        assert_eq!(rx.recv().await.unwrap(), "before");
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (client, mut rx) = test_client(2);

        client.close();
        client.close();
        assert_eq!(client.try_enqueue("late".to_string()), Delivery::Dropped);
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_client_ids_are_unique() {
        let (a, _rx_a) = test_client(1);
        let (b, _rx_b) = test_client(1);
        assert_ne!(a.id, b.id);
    }
}
