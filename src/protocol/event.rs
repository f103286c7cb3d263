//! Signaling event types
//!
//! This module defines the identifier types and the two event enums that make
//! up the wire protocol. Event names are kebab-case, payload fields
//! camelCase; the serialized envelope is `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for one transport connection (one browser tab)
///
/// Minted when the connection registers with the hub, never reused.
/// Serialized as its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque room key. A room exists exactly as long as it has members.
pub type RoomId = String;

/// Which media flag a toggle applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaTarget {
    Video,
    Audio,
}

/// Wire projection of a participant that has attached an identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerInfo {
    /// Display name, unique per room by convention (not enforced globally)
    pub display_name: String,
    /// Whether the participant's camera is enabled
    pub video: bool,
    /// Whether the participant's microphone is enabled
    pub audio: bool,
}

/// One entry of the member list sent to a joiner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEntry {
    pub connection_id: ConnectionId,
    pub info: PeerInfo,
}

/// Events received from clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Ask whether a display name is already taken in a room.
    ///
    /// Point-in-time check, no reservation. The reply goes only to the
    /// requester.
    #[serde(rename_all = "camelCase")]
    NameCheck { room_id: RoomId, display_name: String },

    /// Enter a room under a display name
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: RoomId, display_name: String },

    /// First leg of the handshake: forward an opaque offer to one peer
    #[serde(rename_all = "camelCase")]
    CallOffer {
        target_connection_id: ConnectionId,
        payload: Value,
    },

    /// Second leg of the handshake: forward an opaque answer back
    #[serde(rename_all = "camelCase")]
    CallAnswer {
        payload: Value,
        target_connection_id: ConnectionId,
    },

    /// Leave the current room
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: RoomId },

    /// Flip one of the sender's media flags
    ToggleMedia { target: MediaTarget },

    /// Room-wide chat message, relayed verbatim
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        room_id: RoomId,
        message: String,
        sender: String,
    },
}

/// Events pushed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Reply to `name-check`; `error` is true when the name is taken
    NameCheckResult { error: bool },

    /// Reply to `join-room`: the room's members at the moment of the join,
    /// excluding the joiner itself
    MemberList(Vec<MemberEntry>),

    /// A new participant entered the room (sent to everyone already there)
    #[serde(rename_all = "camelCase")]
    MemberJoined {
        connection_id: ConnectionId,
        info: PeerInfo,
    },

    /// Directed delivery of a `call-offer` payload
    IncomingCall {
        payload: Value,
        from: ConnectionId,
        info: PeerInfo,
    },

    /// Directed delivery of a `call-answer` payload
    CallAccepted { payload: Value, from: ConnectionId },

    /// A participant left the room (sent to the remaining members)
    #[serde(rename_all = "camelCase")]
    MemberLeft {
        connection_id: ConnectionId,
        display_name: String,
    },

    /// A participant flipped a media flag; carries the full resulting state
    #[serde(rename_all = "camelCase")]
    MediaToggled {
        connection_id: ConnectionId,
        target: MediaTarget,
        video: bool,
        audio: bool,
    },

    /// Chat fan-out (the sender receives its own message back)
    ChatMessage { message: String, sender: String },
}
