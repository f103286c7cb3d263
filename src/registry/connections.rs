//! Connection registry
//!
//! Maps each live connection to its participant record and the sender half
//! of its outbound event channel. Pure bookkeeping: callers enforce policy,
//! this type only stores and routes.

use std::collections::HashMap;

use tokio::sync::mpsc;

use super::participant::Participant;
use crate::protocol::{ConnectionId, ServerEvent};

/// Sender half of a connection's outbound event channel
///
/// Pushes are fire-and-forget; a closed receiver means the connection's
/// writer task is gone and the event is simply dropped.
pub type OutboundSender = mpsc::UnboundedSender<ServerEvent>;

struct ConnectionEntry {
    participant: Participant,
    outbound: OutboundSender,
}

/// Registry of live connections
///
/// One entry per live connection, created on register and destroyed on
/// remove. There is exactly one [`Participant`] per entry for the entry's
/// whole lifetime.
#[derive(Default)]
pub struct ConnectionRegistry {
    entries: HashMap<ConnectionId, ConnectionEntry>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection with its outbound channel
    ///
    /// The fresh participant has no display name and both media flags on.
    pub fn register(&mut self, id: ConnectionId, outbound: OutboundSender) -> Participant {
        let participant = Participant::new();
        self.entries.insert(
            id,
            ConnectionEntry {
                participant: participant.clone(),
                outbound,
            },
        );
        participant
    }

    /// Attach a display name to a registered connection
    pub fn attach_identity(&mut self, id: ConnectionId, display_name: impl Into<String>) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.participant.display_name = Some(display_name.into());
        }
    }

    /// Look up the participant for a connection
    pub fn lookup(&self, id: ConnectionId) -> Option<&Participant> {
        self.entries.get(&id).map(|e| &e.participant)
    }

    /// Look up the participant for a connection, mutably
    pub fn lookup_mut(&mut self, id: ConnectionId) -> Option<&mut Participant> {
        self.entries.get_mut(&id).map(|e| &mut e.participant)
    }

    /// Remove a connection
    ///
    /// Idempotent: removing an absent id is a no-op, not an error.
    pub fn remove(&mut self, id: ConnectionId) {
        self.entries.remove(&id);
    }

    /// Whether a connection is currently registered
    pub fn is_live(&self, id: ConnectionId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Push an event to a connection, fire-and-forget
    ///
    /// Silently dropped when the id is not live or the receiver is gone.
    pub fn send(&self, id: ConnectionId, event: ServerEvent) {
        match self.entries.get(&id) {
            Some(entry) => {
                if entry.outbound.send(event).is_err() {
                    tracing::debug!(connection = %id, "Outbound channel closed, event dropped");
                }
            }
            None => {
                tracing::debug!(connection = %id, "No live connection, event dropped");
            }
        }
    }

    /// Number of live connections
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> (ConnectionRegistry, ConnectionId, mpsc::UnboundedReceiver<ServerEvent>) {
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(id, tx);
        (registry, id, rx)
    }

    #[test]
    fn test_register_defaults() {
        let (registry, id, _rx) = registered();

        let p = registry.lookup(id).unwrap();
        assert_eq!(p.display_name, None);
        assert!(p.video);
        assert!(p.audio);
        assert!(p.room.is_none());
        assert!(registry.is_live(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_attach_identity() {
        let (mut registry, id, _rx) = registered();

        registry.attach_identity(id, "Alice");
        assert_eq!(
            registry.lookup(id).unwrap().display_name.as_deref(),
            Some("Alice")
        );

        // Attaching to an unknown id is a no-op.
        registry.attach_identity(ConnectionId::new(), "Bob");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut registry, id, _rx) = registered();

        registry.remove(id);
        assert!(!registry.is_live(id));
        registry.remove(id);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_send_delivers() {
        let (registry, id, mut rx) = registered();

        registry.send(id, ServerEvent::NameCheckResult { error: false });
        assert_eq!(
            rx.try_recv().unwrap(),
            ServerEvent::NameCheckResult { error: false }
        );
    }

    #[test]
    fn test_send_to_absent_or_closed_is_silent() {
        let (registry, id, rx) = registered();

        registry.send(ConnectionId::new(), ServerEvent::NameCheckResult { error: true });

        // Receiver gone: still no panic, event dropped.
        drop(rx);
        registry.send(id, ServerEvent::NameCheckResult { error: true });
    }
}
