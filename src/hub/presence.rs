//! Presence transitions
//!
//! Admission check, room join, media toggle, and the departure path shared
//! by explicit leave and disconnect. Broadcast recipients are always "the
//! room's current members minus the acting connection", computed at the
//! moment of the state change.

use super::store::{HubState, SignalingHub};
use crate::protocol::{ConnectionId, MediaTarget, MemberEntry, ServerEvent};

impl SignalingHub {
    /// Admission check: is `display_name` already held in `room`?
    ///
    /// Point-in-time scan with no reservation — two connections checking the
    /// same name concurrently can both see it free. The protocol performs
    /// check and join as independent round-trips, so the window is inherent;
    /// clients treat the check as advisory.
    pub async fn check_name(&self, id: ConnectionId, room: &str, display_name: &str) {
        let state = self.state.lock().await;
        let taken = state.name_taken(room, display_name);
        tracing::debug!(connection = %id, room = room, display_name = display_name, taken, "Name check");
        state
            .connections
            .send(id, ServerEvent::NameCheckResult { error: taken });
    }

    /// Enter a room under a display name
    ///
    /// Replies to the joiner with the membership as it stood before the join
    /// (self excluded) and notifies each existing member exactly once with
    /// the joiner's id and current media state. A connection that is already
    /// in a room stays where it is.
    pub async fn join_room(&self, id: ConnectionId, room: &str, display_name: &str) {
        let mut state = self.state.lock().await;

        match state.connections.lookup(id) {
            Some(p) if p.in_room() => {
                tracing::debug!(connection = %id, room = room, "Join ignored: already in a room");
                return;
            }
            Some(_) => {}
            None => return,
        }

        // Snapshot before the join so the joiner's list excludes itself.
        let existing: Vec<ConnectionId> = state.rooms.members(room).collect();

        state.rooms.join(room, id);
        state.connections.attach_identity(id, display_name);
        if let Some(p) = state.connections.lookup_mut(id) {
            p.room = Some(room.to_string());
            p.video = true;
            p.audio = true;
        }

        tracing::info!(
            connection = %id,
            room = room,
            display_name = display_name,
            peers = existing.len(),
            "Participant joined"
        );

        let members: Vec<MemberEntry> = existing
            .iter()
            .filter_map(|&m| {
                let info = state.connections.lookup(m)?.peer_info()?;
                Some(MemberEntry {
                    connection_id: m,
                    info,
                })
            })
            .collect();
        state.connections.send(id, ServerEvent::MemberList(members));

        if let Some(info) = state.connections.lookup(id).and_then(|p| p.peer_info()) {
            for m in existing {
                state.connections.send(
                    m,
                    ServerEvent::MemberJoined {
                        connection_id: id,
                        info: info.clone(),
                    },
                );
            }
        }
    }

    /// Flip one of the participant's media flags
    ///
    /// Broadcasts the resulting combined (video, audio) state to the rest of
    /// the room; the flags here are the authoritative copy, peers never
    /// infer them locally. A toggle outside a room is a silent no-op.
    pub async fn toggle_media(&self, id: ConnectionId, target: MediaTarget) {
        let mut state = self.state.lock().await;

        let Some(p) = state.connections.lookup_mut(id) else {
            return;
        };
        let Some(room) = p.room.clone() else {
            tracing::debug!(connection = %id, "Toggle ignored: not in a room");
            return;
        };

        match target {
            MediaTarget::Video => p.video = !p.video,
            MediaTarget::Audio => p.audio = !p.audio,
        }
        let (video, audio) = (p.video, p.audio);

        tracing::debug!(connection = %id, room = %room, target = ?target, video, audio, "Media toggled");

        let peers: Vec<ConnectionId> = state.rooms.members(&room).filter(|&m| m != id).collect();
        for m in peers {
            state.connections.send(
                m,
                ServerEvent::MediaToggled {
                    connection_id: id,
                    target,
                    video,
                    audio,
                },
            );
        }
    }

    /// Leave the current room
    ///
    /// The participant's recorded room is authoritative. The connection
    /// itself stays registered; its record returns to the freshly-registered
    /// state so it can join again later. Not in a room: silent no-op.
    pub async fn leave_room(&self, id: ConnectionId) {
        let mut state = self.state.lock().await;
        if state.depart(id) {
            if let Some(p) = state.connections.lookup_mut(id) {
                p.reset();
            }
        }
    }
}

impl HubState {
    /// Whether any current member of `room` holds `display_name`
    pub(super) fn name_taken(&self, room: &str, display_name: &str) -> bool {
        self.rooms.members(room).any(|m| {
            self.connections
                .lookup(m)
                .and_then(|p| p.display_name.as_deref())
                == Some(display_name)
        })
    }

    /// Departure path shared by explicit leave and disconnect
    ///
    /// Removes the connection from its room (if any) and broadcasts the
    /// departure to the remaining members. Returns whether the connection
    /// was in a room.
    pub(super) fn depart(&mut self, id: ConnectionId) -> bool {
        let Some(p) = self.connections.lookup(id) else {
            return false;
        };
        let Some(room) = p.room.clone() else {
            return false;
        };
        let display_name = p.display_name.clone().unwrap_or_default();

        self.rooms.leave(&room, id);

        tracing::info!(connection = %id, room = %room, display_name = %display_name, "Participant left");

        let remaining: Vec<ConnectionId> = self.rooms.members(&room).collect();
        for m in remaining {
            self.connections.send(
                m,
                ServerEvent::MemberLeft {
                    connection_id: id,
                    display_name: display_name.clone(),
                },
            );
        }
        true
    }
}
