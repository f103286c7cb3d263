//! Connection and room bookkeeping
//!
//! Two plain stores with no policy of their own: the [`ConnectionRegistry`]
//! maps each live connection to its participant record and outbound channel,
//! and the [`RoomIndex`] maps each room key to its member set. All mutation
//! goes through the hub; these types never decide who may do what.

pub mod connections;
pub mod participant;
pub mod rooms;

pub use connections::{ConnectionRegistry, OutboundSender};
pub use participant::Participant;
pub use rooms::RoomIndex;
