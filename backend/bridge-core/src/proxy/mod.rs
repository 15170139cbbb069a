//! The invocation proxy: the presentation side's only way to speak.
//!
//! Every capability on the exposed surface is a one-line wrapper over
//! [`invoke`], which does all of the addressing and marshaling in one
//! place: build the envelope, hand it to the [`BridgeSender`], move on.
//! Invocation is fire-and-forget - it returns immediately, does not
//! await a result, and never surfaces a disconnected or overloaded
//! host to the caller. Delivery failures are logged and that is all.

use crate::catalog::{ChannelPayload, Envelope};
use crate::error::proxy::ProxyError;
use crate::registry::{Inbound, SenderId};

use common::ErrorLocation;

use log::warn;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// What the sending half does when its bounded queue is full.
///
/// Overflow is a deliberate choice, not an accident: an overloaded
/// host process must cost something, and that something is named here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the message being sent and log a warning. The default for
    /// the fire-and-forget surface, which must never fail the caller.
    DropNewest,

    /// Fail the send with [`ProxyError::QueueFull`] so a caller using
    /// [`BridgeSender::try_send`] directly can apply backpressure.
    RejectSender,
}

/// The sending half of the bridge.
///
/// Holds the host-assigned sender identity, the bounded queue into the
/// boundary, and the overflow policy. Cloneable; clones share the
/// queue, so per-channel FIFO from one process is preserved.
#[derive(Clone)]
pub struct BridgeSender {
    sender: SenderId,
    inbound_tx: mpsc::Sender<Inbound>,
    policy: OverflowPolicy,
}

impl BridgeSender {
    pub(crate) fn new(
        sender: SenderId,
        inbound_tx: mpsc::Sender<Inbound>,
        policy: OverflowPolicy,
    ) -> Self {
        Self {
            sender,
            inbound_tx,
            policy,
        }
    }

    pub fn sender_id(&self) -> SenderId {
        self.sender
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Queue an envelope for delivery.
    ///
    /// Never blocks. Once queued a message cannot be withdrawn.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::QueueFull`] - queue at capacity under
    ///   [`OverflowPolicy::RejectSender`]
    /// - [`ProxyError::Disconnected`] - the receiving end is gone
    #[track_caller]
    pub fn try_send(&self, envelope: Envelope) -> Result<(), ProxyError> {
        let inbound = Inbound {
            sender: self.sender,
            envelope,
        };

        match self.inbound_tx.try_send(inbound) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(dropped)) => match self.policy {
                OverflowPolicy::DropNewest => {
                    warn!(
                        "Bridge queue full; dropping message on \"{}\"",
                        dropped.envelope.channel
                    );
                    Ok(())
                }
                OverflowPolicy::RejectSender => Err(ProxyError::QueueFull {
                    location: ErrorLocation::caller(),
                }),
            },
            Err(TrySendError::Closed(_)) => Err(ProxyError::Disconnected {
                location: ErrorLocation::caller(),
            }),
        }
    }
}

/// Send a payload across the boundary, fire-and-forget.
///
/// The single marshaling point for every capability: serializes the
/// tagged payload into an envelope and queues it. Infallible from the
/// caller's point of view - encoding or transport problems are logged,
/// never propagated.
pub fn invoke(sender: &BridgeSender, payload: ChannelPayload) {
    let channel = payload.channel();

    let envelope = match Envelope::encode(&payload) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Failed to encode invocation on \"{channel}\": {e}");
            return;
        }
    };

    if let Err(e) = sender.try_send(envelope) {
        warn!("Invocation on \"{channel}\" not delivered: {e}");
    }
}
