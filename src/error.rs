//! Crate error types
//!
//! Errors for the fallible edges of the server: socket I/O, the WebSocket
//! handshake and transport, and outbound event encoding. Signaling policy
//! violations are not errors; they are silent no-ops at the hub.

use tokio_tungstenite::tungstenite;

/// Error type for server and transport operations
#[derive(Debug)]
pub enum Error {
    /// Socket I/O failure
    Io(std::io::Error),
    /// WebSocket handshake or transport failure
    WebSocket(tungstenite::Error),
    /// Event could not be encoded or decoded
    Codec(serde_json::Error),
}

/// Result alias for server and transport operations
pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::WebSocket(e) => write!(f, "WebSocket error: {}", e),
            Error::Codec(e) => write!(f, "Codec error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Self {
        Error::WebSocket(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Codec(e)
    }
}
