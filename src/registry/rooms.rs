//! Room membership index
//!
//! Maps each room key to the set of connections currently in it. A room has
//! no record of its own: it springs into existence with its first member and
//! the entry is dropped as soon as the last member leaves, so the index
//! never holds an empty member set.

use std::collections::{HashMap, HashSet};

use crate::protocol::{ConnectionId, RoomId};

/// Index of room membership
#[derive(Debug, Default)]
pub struct RoomIndex {
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl RoomIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room, creating the room if absent
    pub fn join(&mut self, room: &str, id: ConnectionId) {
        self.rooms.entry(room.to_string()).or_default().insert(id);
    }

    /// Remove a connection from a room
    ///
    /// Drops the room entry when the last member leaves. Unknown rooms and
    /// non-members are no-ops.
    pub fn leave(&mut self, room: &str, id: ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(&id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }

    /// Iterate over a room's members (empty for unknown rooms, never an error)
    pub fn members(&self, room: &str) -> impl Iterator<Item = ConnectionId> + '_ {
        self.rooms.get(room).into_iter().flatten().copied()
    }

    /// Whether a connection is a member of a room
    pub fn contains(&self, room: &str, id: ConnectionId) -> bool {
        self.rooms.get(room).is_some_and(|m| m.contains(&id))
    }

    /// Number of rooms with at least one member
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the index holds no rooms at all
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
