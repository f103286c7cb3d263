//! Per-connection transport endpoint
//!
//! One instance per browser tab: performs the WebSocket upgrade, registers
//! the connection with the hub, then pumps events in both directions until
//! the peer goes away.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::error::Result;
use crate::hub::SignalingHub;
use crate::protocol::codec;

/// A single signaling connection
pub(crate) struct Connection {
    peer_addr: SocketAddr,
    hub: Arc<SignalingHub>,
    ws: WebSocketStream<TcpStream>,
}

impl Connection {
    /// Upgrade the accepted socket to a WebSocket
    pub(crate) async fn accept(
        socket: TcpStream,
        peer_addr: SocketAddr,
        hub: Arc<SignalingHub>,
    ) -> Result<Self> {
        let ws = tokio_tungstenite::accept_async(socket).await?;
        Ok(Self {
            peer_addr,
            hub,
            ws,
        })
    }

    /// Run the connection to completion
    ///
    /// The read loop dispatches inbound events to the hub; a writer task
    /// drains the outbound channel into the sink. The disconnect transition
    /// at the bottom is unconditional — it runs on clean close, transport
    /// error, and writer death alike.
    pub(crate) async fn run(self) -> Result<()> {
        let Connection {
            peer_addr,
            hub,
            ws,
        } = self;
        let (mut sink, mut stream) = ws.split();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.connect(tx).await;
        tracing::debug!(connection = %id, peer = %peer_addr, "Connection established");

        // Writer task: outbound events become JSON text frames.
        let mut writer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let msg = match codec::encode(&event) {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to encode outbound event");
                        continue;
                    }
                };
                if sink.send(msg).await.is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                frame = stream.next() => match frame {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(msg)) => match codec::decode(&msg) {
                        Ok(Some(event)) => hub.handle_event(id, event).await,
                        Ok(None) => {} // control or binary frame, nothing to dispatch
                        Err(e) => {
                            // A malformed frame affects only itself; the
                            // connection and everyone else's state stay up.
                            tracing::warn!(connection = %id, error = %e, "Ignoring malformed event");
                        }
                    },
                    Some(Err(e)) => {
                        tracing::debug!(connection = %id, error = %e, "WebSocket error");
                        break;
                    }
                },
                _ = &mut writer => break,
            }
        }

        hub.disconnect(id).await;
        writer.abort();

        tracing::debug!(connection = %id, peer = %peer_addr, "Connection torn down");
        Ok(())
    }
}
