//! Signal relay
//!
//! Directed forwarding of opaque handshake payloads between two specific
//! connections, plus room-wide chat fan-out. Payloads are carried untouched
//! and never inspected. Everything here is best-effort: a relay whose target
//! is gone is dropped silently, never retried, never surfaced to the sender.

use serde_json::Value;

use super::store::SignalingHub;
use crate::protocol::{ConnectionId, ServerEvent};

impl SignalingHub {
    /// Forward a handshake offer to `target`
    ///
    /// The sender's display name and media state are looked up fresh at
    /// relay time, not cached from admission. Dropped when the target is not
    /// live or the sender never attached an identity.
    pub async fn relay_offer(&self, sender: ConnectionId, target: ConnectionId, payload: Value) {
        let state = self.state.lock().await;

        let Some(info) = state.connections.lookup(sender).and_then(|p| p.peer_info()) else {
            tracing::debug!(connection = %sender, "Offer dropped: sender has no identity");
            return;
        };
        if !state.connections.is_live(target) {
            tracing::debug!(connection = %sender, target = %target, "Offer dropped: target not live");
            return;
        }

        tracing::debug!(connection = %sender, target = %target, "Relaying offer");
        state.connections.send(
            target,
            ServerEvent::IncomingCall {
                payload,
                from: sender,
                info,
            },
        );
    }

    /// Forward a handshake answer back to the original caller
    pub async fn relay_answer(&self, sender: ConnectionId, target: ConnectionId, payload: Value) {
        let state = self.state.lock().await;

        if !state.connections.is_live(target) {
            tracing::debug!(connection = %sender, target = %target, "Answer dropped: target not live");
            return;
        }

        tracing::debug!(connection = %sender, target = %target, "Relaying answer");
        state.connections.send(
            target,
            ServerEvent::CallAccepted {
                payload,
                from: sender,
            },
        );
    }

    /// Room-wide chat fan-out
    ///
    /// Relayed verbatim to every member of the named room, the sender
    /// included — the one broadcast that does not exclude the acting
    /// connection.
    pub async fn chat(&self, id: ConnectionId, room: &str, message: String, sender: String) {
        let state = self.state.lock().await;

        tracing::debug!(connection = %id, room = room, sender = %sender, "Chat message");

        let members: Vec<ConnectionId> = state.rooms.members(room).collect();
        for m in members {
            state.connections.send(
                m,
                ServerEvent::ChatMessage {
                    message: message.clone(),
                    sender: sender.clone(),
                },
            );
        }
    }
}
