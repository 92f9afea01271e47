//! Room: one collaboration scope's membership and canvas state
//!
//! A room is the single source of truth for its member set and element log,
//! and the sole fan-out point for messages scoped to it. One read/write lock
//! guards both: snapshots and broadcast take shared access, mutations take
//! exclusive access. The lock is never held across socket I/O — broadcast
//! only pushes onto member queues, each drained by its own outbound task.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::client::{Client, ClientId, Delivery};
use crate::models::{Element, UserInfo};

struct RoomState {
    members: HashMap<ClientId, Arc<Client>>,
    elements: Vec<Element>,
}

/// A collaborative drawing room
pub struct Room {
    id: String,
    state: RwLock<RoomState>,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: RwLock::new(RoomState {
                members: HashMap::new(),
                elements: Vec::new(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add a connection to membership.
    ///
    /// Join/roster notices are broadcast by the caller afterwards, keeping
    /// the mutation and the notification ordering explicit at the call site.
    pub fn join(&self, client: Arc<Client>) {
        let mut state = self.state.write();
        let _ = state.members.insert(client.id, client);
    }

    /// Add a connection and enqueue its full-state sync payload in one
    /// exclusive critical section.
    ///
    /// Atomicity matters: if the snapshot, the membership insert, and the
    /// sync enqueue were separate steps, a concurrent draw could land in
    /// neither the snapshot nor the joiner's queue-after-sync, silently
    /// losing the element. Under the write lock no broadcast can interleave,
    /// so the sync is always the first payload on the joiner's queue. The
    /// joiner's queue lock is taken while holding this room's lock,
    /// preserving the Room → Client order.
    pub fn join_with_sync<F>(&self, client: Arc<Client>, make_sync: F)
    where
        F: FnOnce(Vec<Element>) -> Option<String>,
    {
        let mut state = self.state.write();
        let elements = state.elements.clone();
        if let Some(payload) = make_sync(elements) {
            let _ = client.try_enqueue(payload);
        }
        let _ = state.members.insert(client.id, client);
    }

    /// Remove a connection from membership; idempotent if already absent
    pub fn leave(&self, client_id: ClientId) {
        let mut state = self.state.write();
        let _ = state.members.remove(&client_id);
    }

    pub fn member_count(&self) -> usize {
        self.state.read().members.len()
    }

    /// Append one element to the canvas log
    pub fn append_element(&self, element: Element) {
        let mut state = self.state.write();
        state.elements.push(element);
    }

    /// Atomically replace the element log with empty
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.elements.clear();
    }

    /// Independent point-in-time copy of the element log, in append order
    pub fn snapshot_elements(&self) -> Vec<Element> {
        self.state.read().elements.clone()
    }

    /// Independent point-in-time copy of the roster
    pub fn snapshot_roster(&self) -> Vec<UserInfo> {
        let state = self.state.read();
        state.members.values().map(|c| c.user_info()).collect()
    }

    /// Fan a pre-serialized payload out to every member's outbound queue,
    /// skipping `exclude` (pass `None` for room-wide notices).
    ///
    /// Non-blocking: a full queue or a closing connection absorbs the
    /// payload silently. Member queues are locked strictly after this room's
    /// lock, preserving the Hub → Room → Client order.
    pub fn broadcast(&self, payload: &str, exclude: Option<ClientId>) {
        let state = self.state.read();

        let mut dropped = 0usize;
        for (id, client) in &state.members {
            if Some(*id) == exclude {
                continue;
            }
            if client.try_enqueue(payload.to_string()) == Delivery::Dropped {
                dropped += 1;
            }
        }

        if dropped > 0 {
            debug!(
                "room {}: dropped broadcast for {} member(s)",
                self.id, dropped
            );
        }
    }
}
