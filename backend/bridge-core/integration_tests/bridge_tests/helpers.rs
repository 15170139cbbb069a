//! Test helpers for bridge integration tests.
//!
//! This module provides utilities for testing the bridge end to end:
//! - Building a registry whose handlers record everything they observe
//! - Connecting raw WebSocket clients that bypass the exposed surface
//! - Receiving observations with a timeout

use bridge_core::catalog::{Channel, ChannelPayload};
use bridge_core::registry::{BindingPolicy, Dispatch, HandlerRegistry};

use std::time::Duration;

use futures_util::{FutureExt, SinkExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// How long a test waits for a message to cross the bridge.
pub const BRIDGE_TIMEOUT: Duration = Duration::from_secs(2);

/// Settle time after starting a listener, matching the accept loop
/// spawning asynchronously.
pub const LISTENER_SETTLE: Duration = Duration::from_millis(100);

/// Build a registry that records every payload it observes, on every
/// catalog channel.
pub fn recording_registry() -> (HandlerRegistry, mpsc::UnboundedReceiver<ChannelPayload>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut registry = HandlerRegistry::new(BindingPolicy::Reject);

    for channel in Channel::ALL {
        register_recorder(&mut registry, channel, tx.clone());
    }

    (registry, rx)
}

/// Build a registry recording only the given channels; the rest stay
/// unbound.
pub fn partial_recording_registry(
    channels: &[Channel],
) -> (HandlerRegistry, mpsc::UnboundedReceiver<ChannelPayload>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut registry = HandlerRegistry::new(BindingPolicy::Reject);

    for channel in channels {
        register_recorder(&mut registry, *channel, tx.clone());
    }

    (registry, rx)
}

fn register_recorder(
    registry: &mut HandlerRegistry,
    channel: Channel,
    tx: mpsc::UnboundedSender<ChannelPayload>,
) {
    registry
        .register(
            channel,
            Box::new(move |_context, payload| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(payload);
                    Dispatch::Pending
                }
                .boxed()
            }),
        )
        .expect("recorder registration should succeed");
}

/// Receive the next observed payload, failing the test if the bridge
/// does not deliver in time.
pub async fn recv_observed(rx: &mut mpsc::UnboundedReceiver<ChannelPayload>) -> ChannelPayload {
    tokio::time::timeout(BRIDGE_TIMEOUT, rx.recv())
        .await
        .expect("Timed out waiting for the bridge to deliver")
        .expect("Observation channel closed unexpectedly")
}

/// Assert that nothing more crosses the bridge within a grace period.
pub async fn assert_nothing_observed(rx: &mut mpsc::UnboundedReceiver<ChannelPayload>) {
    let outcome = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
    assert!(outcome.is_err(), "Unexpected message crossed the bridge");
}

/// Connect a raw WebSocket client to the listener, bypassing the
/// exposed surface entirely.
pub async fn connect_raw(port: u16) -> WebSocketStream<MaybeTlsStream<TcpStream>> {
    let url = format!("ws://127.0.0.1:{port}");
    let (ws_stream, _) = connect_async(url.as_str())
        .await
        .expect("Failed to connect raw WebSocket client");
    ws_stream
}

/// Send one raw text frame.
pub async fn send_frame(ws: &mut WebSocketStream<MaybeTlsStream<TcpStream>>, frame: &str) {
    ws.send(Message::Text(frame.to_string().into()))
        .await
        .expect("Failed to send raw frame");
}
