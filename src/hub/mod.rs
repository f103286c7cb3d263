//! Signaling hub
//!
//! The hub owns the registry/index pair and is the only place signaling
//! state is mutated. Presence transitions (admission, join, toggle, leave)
//! and the payload relay live in separate files but share the one store.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<SignalingHub>
//!                   ┌────────────────────────┐
//!                   │ Mutex<HubState {       │
//!                   │   connections,         │
//!                   │   rooms,               │
//!                   │ }>                     │
//!                   └───────────┬────────────┘
//!                               │ handle_event (one at a time)
//!        ┌──────────────────────┼──────────────────────┐
//!        │                      │                      │
//!        ▼                      ▼                      ▼
//!   [Connection]           [Connection]           [Connection]
//!   decode frame           outbound rx            outbound rx
//!        │                      ▲                      ▲
//!        └──► hub.handle_event ─┴── registry.send ─────┘
//! ```
//!
//! # One handler at a time
//!
//! A single `Mutex` scopes the whole state, so each inbound event runs to
//! completion before the next one touches the registry or the index.
//! Outbound pushes are unbounded-channel sends and never block under the
//! lock; per-connection writer tasks drain them independently, so no
//! handler ever waits on another connection's transport.

mod presence;
mod relay;
mod store;

pub use store::SignalingHub;
