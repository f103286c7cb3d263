//! Participant records

use crate::protocol::{PeerInfo, RoomId};

/// Per-connection participant record
///
/// Created when the connection registers: no display name, camera and
/// microphone on, no room. The record doubles as the connection's lifecycle
/// state — `room` is `None` while merely registered and `Some` while in a
/// room; leaving a room returns the record to its initial shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Display name attached on join; `None` until then
    pub display_name: Option<String>,
    /// Whether the camera is enabled
    pub video: bool,
    /// Whether the microphone is enabled
    pub audio: bool,
    /// The room this connection is currently in, if any
    pub room: Option<RoomId>,
}

impl Participant {
    pub(crate) fn new() -> Self {
        Self {
            display_name: None,
            video: true,
            audio: true,
            room: None,
        }
    }

    /// Wire projection of this participant
    ///
    /// `None` until an identity has been attached; a participant without a
    /// display name is invisible to peers.
    pub fn peer_info(&self) -> Option<PeerInfo> {
        self.display_name.as_ref().map(|name| PeerInfo {
            display_name: name.clone(),
            video: self.video,
            audio: self.audio,
        })
    }

    /// Whether the participant is currently in a room
    pub fn in_room(&self) -> bool {
        self.room.is_some()
    }

    /// Return the record to its freshly-registered state
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Participant {
    fn default() -> Self {
        Self::new()
    }
}
