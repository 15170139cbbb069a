//! The dispatch loop: from inbound envelope to handler invocation.
//!
//! A single dispatcher task owns the registry and drains a bounded
//! queue of inbound messages. Handlers run sequentially within that
//! task - no two handlers ever run concurrently with each other - but
//! each handler is async, so a slow capability yields instead of
//! wedging the loop.
//!
//! Failure handling is strictly host-side: malformed payloads,
//! unknown channels, unregistered channels, handler errors, and even
//! handler panics are logged and swallowed. Nothing ever reaches back
//! to the sender, and nothing ever kills the dispatcher.

use crate::catalog::{Channel, ChannelPayload, Envelope};
use crate::proxy::{BridgeSender, OverflowPolicy};
use crate::registry::{Ack, Dispatch, HandlerContext, HandlerRegistry, SenderId};

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// An envelope tagged with the host-assigned identity of its sender.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub sender: SenderId,
    pub envelope: Envelope,
}

/// Spawn the dispatcher task for a fully registered registry.
///
/// Takes ownership of the registry; from this point the mapping is
/// read-only. Returns the inbound queue's sending half (the transport
/// feeds it) and the task handle. The task runs until every sending
/// half is dropped.
pub fn spawn_dispatcher(
    registry: HandlerRegistry,
    capacity: usize,
) -> (mpsc::Sender<Inbound>, JoinHandle<()>) {
    let (inbound_tx, inbound_rx) = mpsc::channel(capacity);
    let task = tokio::spawn(run_dispatcher(registry, inbound_rx));
    (inbound_tx, task)
}

/// Pair a [`BridgeSender`] directly with a dispatcher, in-process.
///
/// This is the boundary without the wire: tests and single-process
/// embeddings get the same queueing, ordering, and dispatch semantics
/// as the WebSocket transport.
pub fn local_link(
    registry: HandlerRegistry,
    capacity: usize,
    policy: OverflowPolicy,
) -> (BridgeSender, JoinHandle<()>) {
    let (inbound_tx, task) = spawn_dispatcher(registry, capacity);
    let sender = BridgeSender::new(SenderId::new(), inbound_tx, policy);
    info!("Local bridge link established (sender {})", sender.sender_id());
    (sender, task)
}

async fn run_dispatcher(registry: HandlerRegistry, mut inbound_rx: mpsc::Receiver<Inbound>) {
    info!("Bridge dispatcher started");

    while let Some(inbound) = inbound_rx.recv().await {
        let context = HandlerContext::new(inbound.sender);
        dispatch_envelope(&registry, context, inbound.envelope).await;
    }

    info!("Bridge dispatcher stopped: all senders disconnected");
}

/// Deliver one envelope to its bound handler(s).
///
/// Performs, in order: channel resolution, typed payload decode,
/// optional validation, then handler invocation. Every early exit is
/// a logged drop, never a crash.
pub async fn dispatch_envelope(
    registry: &HandlerRegistry,
    context: HandlerContext,
    envelope: Envelope,
) {
    let Some(channel) = Channel::parse(&envelope.channel) else {
        warn!(
            "Dropping message from {} on unknown channel \"{}\"",
            context.sender, envelope.channel
        );
        return;
    };

    let payload = match ChannelPayload::decode(channel, &envelope.payload) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Dropping malformed payload from {}: {}", context.sender, e);
            return;
        }
    };

    if let Some(validator) = registry.validator_for(channel) {
        if let Err(reason) = validator(&payload) {
            warn!(
                "Dropping message from {} on \"{channel}\": validator rejected: {reason}",
                context.sender
            );
            return;
        }
    }

    let handlers = registry.handlers_for(channel);
    if handlers.is_empty() {
        warn!(
            "No handler bound for channel \"{channel}\"; dropping message from {}",
            context.sender
        );
        return;
    }

    for handler in handlers {
        let invocation = handler(context, payload.clone());

        match AssertUnwindSafe(invocation).catch_unwind().await {
            Ok(outcome) => report_outcome(registry, channel, outcome),
            Err(_) => {
                error!("Handler for \"{channel}\" panicked; message dropped");
            }
        }
    }
}

/// Log a handler outcome and forward it to the ack sink when present.
fn report_outcome(registry: &HandlerRegistry, channel: Channel, outcome: Dispatch) {
    match &outcome {
        Dispatch::Pending => {
            debug!("Handler for \"{channel}\" accepted message (fire-and-forget)");
            return;
        }
        Dispatch::Ok(_) => {
            debug!("Handler for \"{channel}\" completed with a value");
        }
        Dispatch::Err(reason) => {
            error!("Handler for \"{channel}\" failed: {reason}");
        }
    }

    if let Some(ack_tx) = registry.ack_sink() {
        if ack_tx.send(Ack { channel, outcome }).is_err() {
            warn!("Ack sink for \"{channel}\" is gone; acknowledgement dropped");
        }
    }
}
