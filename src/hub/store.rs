//! Hub state and event dispatch

use tokio::sync::Mutex;

use crate::protocol::{ClientEvent, ConnectionId};
use crate::registry::{ConnectionRegistry, OutboundSender, RoomIndex};

/// Shared signaling state
///
/// Owns the connection registry and the room index behind one lock. The hub
/// is passed around as an owned store (`Arc<SignalingHub>`), never a
/// process-wide singleton, so it stays testable and replaceable.
pub struct SignalingHub {
    pub(super) state: Mutex<HubState>,
}

pub(super) struct HubState {
    pub(super) connections: ConnectionRegistry,
    pub(super) rooms: RoomIndex,
}

impl SignalingHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HubState {
                connections: ConnectionRegistry::new(),
                rooms: RoomIndex::new(),
            }),
        }
    }

    /// Register a new connection and mint its id
    ///
    /// `outbound` is the channel the hub will push this connection's events
    /// into for the rest of its life.
    pub async fn connect(&self, outbound: OutboundSender) -> ConnectionId {
        let id = ConnectionId::new();
        let mut state = self.state.lock().await;
        state.connections.register(id, outbound);
        tracing::debug!(connection = %id, total = state.connections.len(), "Connection registered");
        id
    }

    /// Tear down a connection
    ///
    /// Runs the same departure path as an explicit leave, then discards the
    /// registry entry. Unconditional: the transport calls this on any exit,
    /// clean or not, and calling it for an unknown id is a no-op.
    pub async fn disconnect(&self, id: ConnectionId) {
        let mut state = self.state.lock().await;
        state.depart(id);
        state.connections.remove(id);
        tracing::debug!(connection = %id, total = state.connections.len(), "Connection removed");
    }

    /// Dispatch one inbound event to its effect
    ///
    /// The single typed mapping from event to handler; the transport layer
    /// calls nothing else.
    pub async fn handle_event(&self, id: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::NameCheck {
                room_id,
                display_name,
            } => self.check_name(id, &room_id, &display_name).await,
            ClientEvent::JoinRoom {
                room_id,
                display_name,
            } => self.join_room(id, &room_id, &display_name).await,
            ClientEvent::CallOffer {
                target_connection_id,
                payload,
            } => self.relay_offer(id, target_connection_id, payload).await,
            ClientEvent::CallAnswer {
                payload,
                target_connection_id,
            } => self.relay_answer(id, target_connection_id, payload).await,
            ClientEvent::LeaveRoom { .. } => self.leave_room(id).await,
            ClientEvent::ToggleMedia { target } => self.toggle_media(id, target).await,
            ClientEvent::ChatMessage {
                room_id,
                message,
                sender,
            } => self.chat(id, &room_id, message, sender).await,
        }
    }

    /// Number of live connections
    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }

    /// Number of rooms with at least one member
    pub async fn room_count(&self) -> usize {
        self.state.lock().await.rooms.room_count()
    }
}

impl Default for SignalingHub {
    fn default() -> Self {
        Self::new()
    }
}
