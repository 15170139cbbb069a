// Unit tests for the invocation proxy: overflow policies and the
// behavior of a sender whose receiving end is gone.

use crate::catalog::{ChannelPayload, Envelope};
use crate::error::proxy::ProxyError;
use crate::proxy::{BridgeSender, OverflowPolicy, invoke};
use crate::registry::{Inbound, SenderId};

use serde_json::json;
use tokio::sync::mpsc;

fn envelope(message: &str) -> Envelope {
    Envelope {
        channel: String::from("button-clicked"),
        payload: json!(message),
    }
}

/// Sender over a capacity-1 queue that nothing drains, so the second
/// send deterministically observes a full queue.
fn saturable_sender(policy: OverflowPolicy) -> (BridgeSender, mpsc::Receiver<Inbound>) {
    let (tx, rx) = mpsc::channel(1);
    (BridgeSender::new(SenderId::new(), tx, policy), rx)
}

/// **VALUE**: Verifies that a full queue under `RejectSender` fails the
/// send with `QueueFull`.
///
/// **WHY THIS MATTERS**: `RejectSender` is the backpressure policy;
/// callers using `try_send` directly rely on the error to slow down.
/// Overflow must cost something, and this policy names that cost.
///
/// **BUG THIS CATCHES**: Would catch the overflow branch silently
/// dropping (or blocking) under `RejectSender`, which would turn
/// backpressure into message loss.
#[test]
fn given_reject_sender_policy_when_queue_full_then_try_send_returns_queue_full() {
    let (sender, _rx) = saturable_sender(OverflowPolicy::RejectSender);
    assert_eq!(sender.policy(), OverflowPolicy::RejectSender);

    sender
        .try_send(envelope("first"))
        .expect("first send should fit the queue");

    assert!(matches!(
        sender.try_send(envelope("second")),
        Err(ProxyError::QueueFull { .. })
    ));
}

/// **VALUE**: Verifies that a full queue under `DropNewest` drops the
/// overflowing message without failing the sender.
///
/// **WHY THIS MATTERS**: `DropNewest` is the policy behind the
/// fire-and-forget surface; `invoke` must stay infallible even when
/// the host is saturated, and queued messages must stay intact.
///
/// **BUG THIS CATCHES**: Would catch `DropNewest` surfacing an error,
/// or the overflow path evicting an already-queued message instead of
/// the new one.
#[test]
fn given_drop_newest_policy_when_queue_full_then_newest_message_dropped() {
    let (sender, mut rx) = saturable_sender(OverflowPolicy::DropNewest);

    sender
        .try_send(envelope("kept"))
        .expect("first send should fit the queue");
    sender
        .try_send(envelope("overflow"))
        .expect("DropNewest must not surface a full queue");

    invoke(
        &sender,
        ChannelPayload::ButtonClicked(String::from("also overflow")),
    );

    let queued = rx.try_recv().expect("the first message should be queued");
    assert_eq!(queued.envelope.payload, json!("kept"));
    assert!(
        rx.try_recv().is_err(),
        "Overflowed messages must not reach the queue"
    );
}

/// **VALUE**: Verifies that a sender whose receiving end is gone fails
/// with `Disconnected` rather than `QueueFull`.
///
/// **WHY THIS MATTERS**: A dead dispatcher and a saturated dispatcher
/// are different conditions; a caller applying backpressure must be
/// able to tell "slow down" apart from "give up".
///
/// **BUG THIS CATCHES**: Would catch the closed-channel branch being
/// folded into the overflow handling, where `DropNewest` would then
/// swallow every message into a void forever.
#[test]
fn given_dropped_receiver_when_sent_then_disconnected_error() {
    let (sender, rx) = saturable_sender(OverflowPolicy::RejectSender);
    drop(rx);

    assert!(matches!(
        sender.try_send(envelope("ping")),
        Err(ProxyError::Disconnected { .. })
    ));
}
