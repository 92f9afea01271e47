//! Process-wide room registry
//!
//! Rooms are created on first use and live for the process lifetime; there
//! is deliberately no removal path, so an idle room keeps its canvas for any
//! future joiner. This registry's lock is the root of the Hub → Room →
//! Client lock order and is never held while a room or client lock is taken
//! by anything other than the operations here.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::room::Room;

/// Registry mapping room keys to live rooms
pub struct Hub {
    rooms: RwLock<HashMap<String, Arc<Room>>>,
}

impl Hub {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Return the room for `key`, creating it if absent.
    ///
    /// Creation happens under the exclusive registry lock with a re-check,
    /// so two concurrent calls with the same unseen key always observe the
    /// same room.
    pub fn get_or_create(&self, key: &str) -> Arc<Room> {
        if let Some(room) = self.rooms.read().get(key) {
            return room.clone();
        }

        let mut rooms = self.rooms.write();
        if let Some(room) = rooms.get(key) {
            return room.clone();
        }
        let room = Arc::new(Room::new(key));
        let _ = rooms.insert(key.to_string(), room.clone());
        info!("created room {}", key);
        room
    }

    /// Number of rooms ever created (rooms are never removed)
    pub fn room_count(&self) -> usize {
        self.rooms.read().len()
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_get_or_create_returns_same_room() {
        let hub = Hub::new();

        let first = hub.get_or_create("abc123");
        let second = hub.get_or_create("abc123");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(hub.room_count(), 1);
    }

    #[test]
    fn test_distinct_keys_get_distinct_rooms() {
        let hub = Hub::new();

        let a = hub.get_or_create("room-a");
        let b = hub.get_or_create("room-b");

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(hub.room_count(), 2);
    }

    #[test]
    fn test_concurrent_creation_yields_one_room() {
        let hub = Arc::new(Hub::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let hub = hub.clone();
                thread::spawn(move || hub.get_or_create("contested"))
            })
            .collect();

        let rooms: Vec<Arc<Room>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(hub.room_count(), 1);
        for room in &rooms[1..] {
            assert!(Arc::ptr_eq(&rooms[0], room));
        }
    }
}
