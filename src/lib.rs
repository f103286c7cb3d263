//! WebRTC room signaling server
//!
//! Browsers cannot discover each other's network addresses or negotiate media
//! sessions on their own; a third party has to relay a small amount of
//! handshake data between them. This crate is that third party: a WebSocket
//! signaling coordinator that admits participants into named rooms, tracks
//! live membership and per-participant media state, forwards opaque handshake
//! payloads between two specific connections, and fans out membership changes
//! to the rest of a room. Media itself never touches this server.
//!
//! # Architecture
//!
//! ```text
//!   browser tab ──ws──► Connection ──► SignalingHub ──► Connection ──ws──► browser tab
//!                        (decode)       │ registry │      (encode)
//!                                       │ rooms    │
//!                                       └──────────┘
//! ```
//!
//! Each connection is one transport task; all state lives in the
//! [`SignalingHub`], which serializes event handling so no two mutations
//! interleave. Everything is in-memory — a restart forgets every room, by
//! design.
//!
//! # Example
//!
//! ```no_run
//! use signal_rs::{ServerConfig, SignalingServer};
//!
//! #[tokio::main]
//! async fn main() -> signal_rs::Result<()> {
//!     let server = SignalingServer::bind(ServerConfig::default()).await?;
//!     server.run().await
//! }
//! ```

pub mod error;
pub mod hub;
pub mod protocol;
pub mod registry;
pub mod server;

pub use error::{Error, Result};
pub use hub::SignalingHub;
pub use protocol::{
    ClientEvent, ConnectionId, MediaTarget, MemberEntry, PeerInfo, RoomId, ServerEvent,
};
pub use registry::{ConnectionRegistry, Participant, RoomIndex};
pub use server::{ServerConfig, SignalingServer};
