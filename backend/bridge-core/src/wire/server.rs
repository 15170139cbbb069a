//! Host-side bridge listener.
//!
//! Accepts presentation-process connections, assigns each a
//! [`SenderId`], and forwards every decodable frame into the single
//! dispatcher queue. One dispatcher serves all connections, so
//! handlers never run concurrently no matter how many presentation
//! processes connect.

use crate::BRIDGE_HOSTNAME;
use crate::BRIDGE_QUEUE_CAPACITY;
use crate::catalog::Envelope;
use crate::error::wire::WireError;
use crate::registry::{HandlerRegistry, Inbound, SenderId, spawn_dispatcher};
use crate::wire::handle::BridgeListenerHandle;

use common::ErrorLocation;

use std::net::SocketAddr;

use futures_util::StreamExt;
use log::{error, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// Start the bridge listener on the given port.
///
/// Binds `127.0.0.1:<port>`, takes ownership of the fully registered
/// registry, spawns its dispatcher, and accepts connections in a
/// background task.
///
/// # Errors
///
/// Returns [`WireError::Io`] if the port cannot be bound.
///
/// # Security
///
/// - Binds to loopback only
/// - Individual connections from non-loopback addresses are rejected
///   silently
pub async fn start_bridge_listener(
    port: u16,
    registry: HandlerRegistry,
) -> Result<BridgeListenerHandle, WireError> {
    let address = format!("{BRIDGE_HOSTNAME}:{port}");
    let listener = TcpListener::bind(&address).await?;

    info!("Bridge listener on {address}");

    let (inbound_tx, _dispatcher) = spawn_dispatcher(registry, BRIDGE_QUEUE_CAPACITY);

    tokio::spawn(async move {
        while let Ok((stream, addr)) = listener.accept().await {
            let inbound_tx = inbound_tx.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, addr, inbound_tx).await {
                    error!("Bridge connection from {addr} failed: {e}");
                }
            });
        }
    });

    Ok(BridgeListenerHandle {})
}

/// Serve one presentation-process connection.
///
/// Reads frames until the peer disconnects. A frame that does not
/// parse as an envelope is logged and dropped; envelope-level problems
/// (unknown channel, malformed payload) are the dispatcher's to
/// report. Frames are forwarded in arrival order, which preserves the
/// per-channel FIFO guarantee.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    inbound_tx: mpsc::Sender<Inbound>,
) -> Result<(), WireError> {
    // Reject non-loopback connections silently
    if !addr.ip().is_loopback() {
        warn!("Rejected non-loopback connection from {addr}");
        return Ok(());
    }

    let mut ws_stream = accept_async(stream).await.map_err(|e| WireError::Handshake {
        message: format!("WebSocket handshake failed: {e}"),
        location: ErrorLocation::caller(),
    })?;

    let sender = SenderId::new();
    info!("Presentation process {sender} connected from {addr}");

    while let Some(msg) = ws_stream.next().await {
        match msg {
            Ok(Message::Text(frame)) => {
                forward_frame(&inbound_tx, sender, frame.as_str()).await;
            }
            Ok(Message::Binary(data)) => match std::str::from_utf8(&data) {
                Ok(frame) => forward_frame(&inbound_tx, sender, frame).await,
                Err(_) => warn!("Dropping non-UTF-8 frame from {sender}"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {
                // Ping/pong handled by the protocol layer
            }
            Err(e) => {
                return Err(WireError::Read {
                    message: format!("Error reading frame from {addr}: {e}"),
                    location: ErrorLocation::caller(),
                });
            }
        }
    }

    info!("Presentation process {sender} disconnected");
    Ok(())
}

/// Parse one frame and queue it for dispatch.
async fn forward_frame(inbound_tx: &mpsc::Sender<Inbound>, sender: SenderId, frame: &str) {
    let envelope = match Envelope::from_json(frame) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Dropping undecodable frame from {sender}: {e}");
            return;
        }
    };

    if inbound_tx.send(Inbound { sender, envelope }).await.is_err() {
        error!("Dispatcher queue closed; dropping message from {sender}");
    }
}
