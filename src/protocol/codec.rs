//! Frame codec
//!
//! Maps WebSocket messages to signaling events and back. Only text frames
//! carry protocol content; binary frames and control frames are ignored here
//! (the WebSocket layer answers pings on its own).

use tokio_tungstenite::tungstenite::Message;

use crate::error::Result;
use crate::protocol::event::{ClientEvent, ServerEvent};

/// Encode an outbound event as a JSON text frame
pub fn encode(event: &ServerEvent) -> Result<Message> {
    let json = serde_json::to_string(event)?;
    Ok(Message::text(json))
}

/// Decode an inbound frame
///
/// Returns `Ok(None)` for frames that carry no protocol content (binary,
/// ping/pong). A text frame that fails to parse is an error; the caller
/// decides whether that is fatal for the connection.
pub fn decode(msg: &Message) -> Result<Option<ClientEvent>> {
    match msg {
        Message::Text(text) => Ok(Some(serde_json::from_str(text.as_str())?)),
        _ => Ok(None),
    }
}
