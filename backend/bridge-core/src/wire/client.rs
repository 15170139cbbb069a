//! Presentation-side bridge connector.
//!
//! Connects to the host listener and returns a [`BridgeSender`] backed
//! by a pump task: envelopes queue into the bounded channel and the
//! pump writes them to the socket as JSON text frames, in order. Once
//! connected, a dead or slow host never fails an invocation - frames
//! that cannot be written are logged and lost, which is the
//! fire-and-forget contract.

use crate::BRIDGE_QUEUE_CAPACITY;
use crate::BRIDGE_WS_BASE_URL;
use crate::error::wire::WireError;
use crate::proxy::{BridgeSender, OverflowPolicy};
use crate::registry::{Inbound, SenderId};

use common::ErrorLocation;

use futures_util::SinkExt;
use log::{info, warn};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Connect to the host's bridge listener on the given port.
///
/// # Errors
///
/// Returns [`WireError::Handshake`] if the host is not listening or
/// the WebSocket upgrade fails. Connection is the only moment a
/// transport failure is surfaced; everything after is fire-and-forget.
pub async fn connect_bridge(port: u16, policy: OverflowPolicy) -> Result<BridgeSender, WireError> {
    let url = format!("{BRIDGE_WS_BASE_URL}:{port}");

    let (ws_stream, _response) =
        connect_async(url.as_str())
            .await
            .map_err(|e| WireError::Handshake {
                message: format!("Failed to connect bridge at {url}: {e}"),
                location: ErrorLocation::caller(),
            })?;

    info!("Bridge connected to {url}");

    let (outbound_tx, mut outbound_rx) = mpsc::channel::<Inbound>(BRIDGE_QUEUE_CAPACITY);

    tokio::spawn(async move {
        let mut ws_stream = ws_stream;

        while let Some(inbound) = outbound_rx.recv().await {
            let frame = match inbound.envelope.to_json() {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Failed to encode outbound frame: {e}");
                    continue;
                }
            };

            if let Err(e) = ws_stream.send(Message::Text(frame.into())).await {
                warn!("Bridge write failed; dropping queued messages: {e}");
                break;
            }
        }
    });

    Ok(BridgeSender::new(SenderId::new(), outbound_tx, policy))
}
