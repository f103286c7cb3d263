//! Wire protocol
//!
//! The signaling protocol is a closed set of JSON events exchanged as
//! WebSocket text frames. Every frame carries an `event` name and a `data`
//! payload; inbound and outbound events are separate enums so the dispatch
//! surface stays a single typed match rather than a string-keyed table.
//!
//! Handshake payloads (`call-offer` / `call-answer`) are produced and
//! consumed by the browsers' media stacks. The server carries them as opaque
//! JSON and never looks inside.

pub mod codec;
pub mod event;

pub use event::{
    ClientEvent, ConnectionId, MediaTarget, MemberEntry, PeerInfo, RoomId, ServerEvent,
};
