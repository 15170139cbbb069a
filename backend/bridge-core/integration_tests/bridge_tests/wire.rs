//! End-to-end tests across the real WebSocket boundary.

use crate::bridge_tests::helpers::{
    LISTENER_SETTLE, assert_nothing_observed, connect_raw, partial_recording_registry,
    recording_registry, recv_observed, send_frame,
};

use bridge_core::catalog::{Channel, ChannelPayload, CreateUserData};
use bridge_core::proxy::OverflowPolicy;
use bridge_core::surface::ExposedSurface;
use bridge_core::wire::{connect_bridge, start_bridge_listener};

/// **VALUE**: Verifies that a create-user invocation crosses the
/// boundary and reaches the handler with every field intact.
///
/// **WHY THIS MATTERS**: This is the round-trip contract: the payload
/// the presentation process hands to the surface is exactly the
/// payload the host handler observes - no mutation, no lost fields.
///
/// **BUG THIS CATCHES**: Would catch any marshaling defect between the
/// surface stub, the envelope codec, the wire framing, and dispatch.
#[tokio::test]
async fn given_connected_bridge_when_create_user_invoked_then_handler_observes_exact_payload() {
    let port = 47641;
    let (registry, mut observed) = recording_registry();

    let _handle = start_bridge_listener(port, registry)
        .await
        .expect("Failed to start bridge listener");
    tokio::time::sleep(LISTENER_SETTLE).await;

    let sender = connect_bridge(port, OverflowPolicy::DropNewest)
        .await
        .expect("Failed to connect bridge");
    let surface = ExposedSurface::new(sender);

    surface.create_user(CreateUserData {
        email: String::from("a@b.com"),
        name: String::from("Ada"),
    });

    let payload = recv_observed(&mut observed).await;
    assert_eq!(
        payload,
        ChannelPayload::CreateUser(CreateUserData {
            email: String::from("a@b.com"),
            name: String::from("Ada"),
        })
    );
}

/// **VALUE**: Verifies FIFO delivery for messages sent on the same
/// channel from the same sender.
///
/// **WHY THIS MATTERS**: Per-channel FIFO is the bridge's only
/// ordering guarantee; presentation code is allowed to rely on it.
///
/// **BUG THIS CATCHES**: Would catch reordering anywhere in the
/// pipeline - a racy pump task, an unordered queue, or concurrent
/// handler execution.
#[tokio::test]
async fn given_three_messages_on_one_channel_when_dispatched_then_order_preserved() {
    let port = 47642;
    let (registry, mut observed) = recording_registry();

    let _handle = start_bridge_listener(port, registry)
        .await
        .expect("Failed to start bridge listener");
    tokio::time::sleep(LISTENER_SETTLE).await;

    let sender = connect_bridge(port, OverflowPolicy::DropNewest)
        .await
        .expect("Failed to connect bridge");
    let surface = ExposedSurface::new(sender);

    surface.button_clicked("A");
    surface.button_clicked("B");
    surface.button_clicked("C");

    for expected in ["A", "B", "C"] {
        let payload = recv_observed(&mut observed).await;
        assert_eq!(payload, ChannelPayload::ButtonClicked(String::from(expected)));
    }
}

/// **VALUE**: Verifies that a frame naming an off-catalog channel is
/// dropped and the host keeps serving.
///
/// **WHY THIS MATTERS**: The wire accepts arbitrary clients; an
/// unknown channel must be a logged drop, never a crash and never a
/// dispatch to some other handler.
///
/// **BUG THIS CATCHES**: Would catch the connection task or dispatcher
/// dying on unknown names, which would silently kill the bridge for
/// all later messages.
#[tokio::test]
async fn given_unknown_channel_frame_when_sent_then_dropped_and_host_survives() {
    let port = 47643;
    let (registry, mut observed) = recording_registry();

    let _handle = start_bridge_listener(port, registry)
        .await
        .expect("Failed to start bridge listener");
    tokio::time::sleep(LISTENER_SETTLE).await;

    let mut ws = connect_raw(port).await;
    send_frame(&mut ws, r#"{"channel":"open-shell","payload":"rm -rf /"}"#).await;
    send_frame(&mut ws, r#"{"channel":"button-clicked","payload":"still here"}"#).await;

    let payload = recv_observed(&mut observed).await;
    assert_eq!(payload, ChannelPayload::ButtonClicked(String::from("still here")));
    assert_nothing_observed(&mut observed).await;
}

/// **VALUE**: Verifies that a malformed payload never reaches the
/// handler and does not wedge the connection.
///
/// **WHY THIS MATTERS**: Payload validation at the boundary is the
/// explicit improvement over passing malformed data into handlers to
/// fail unpredictably.
///
/// **BUG THIS CATCHES**: Would catch decode errors propagating out of
/// dispatch and tearing down the read loop.
#[tokio::test]
async fn given_malformed_payload_frame_when_sent_then_handler_never_sees_it() {
    let port = 47644;
    let (registry, mut observed) = recording_registry();

    let _handle = start_bridge_listener(port, registry)
        .await
        .expect("Failed to start bridge listener");
    tokio::time::sleep(LISTENER_SETTLE).await;

    let mut ws = connect_raw(port).await;
    // create-user expects an object with email and name
    send_frame(&mut ws, r#"{"channel":"create-user","payload":42}"#).await;
    send_frame(&mut ws, r#"{"channel":"button-clicked","payload":"after the garbage"}"#).await;

    let payload = recv_observed(&mut observed).await;
    assert_eq!(
        payload,
        ChannelPayload::ButtonClicked(String::from("after the garbage"))
    );
    assert_nothing_observed(&mut observed).await;
}

/// **VALUE**: Verifies that a message on an unbound channel is dropped
/// while bound channels keep working.
///
/// **WHY THIS MATTERS**: Drop-on-unregistered is the contract: no
/// crash, no other handler invoked, and the condition is diagnosable
/// from logs rather than silent.
///
/// **BUG THIS CATCHES**: Would catch dispatch misrouting messages from
/// unbound channels into whichever handler exists.
#[tokio::test]
async fn given_unbound_channel_when_message_sent_then_dropped_without_side_effects() {
    let port = 47645;
    let (registry, mut observed) = partial_recording_registry(&[Channel::ButtonClicked]);

    let _handle = start_bridge_listener(port, registry)
        .await
        .expect("Failed to start bridge listener");
    tokio::time::sleep(LISTENER_SETTLE).await;

    let sender = connect_bridge(port, OverflowPolicy::DropNewest)
        .await
        .expect("Failed to connect bridge");
    let surface = ExposedSurface::new(sender);

    surface.create_user(CreateUserData {
        email: String::from("a@b.com"),
        name: String::from("Ada"),
    });
    surface.button_clicked("only this lands");

    let payload = recv_observed(&mut observed).await;
    assert_eq!(
        payload,
        ChannelPayload::ButtonClicked(String::from("only this lands"))
    );
    assert_nothing_observed(&mut observed).await;
}

/// **VALUE**: Verifies that a frame that is not JSON at all leaves the
/// connection and later frames intact.
///
/// **WHY THIS MATTERS**: The presentation side is out of the host's
/// control; a hostile or broken client must only ever hurt its own
/// messages.
///
/// **BUG THIS CATCHES**: Would catch frame parsing errors closing the
/// connection or killing the listener.
#[tokio::test]
async fn given_non_json_frame_when_sent_then_connection_still_delivers() {
    let port = 47646;
    let (registry, mut observed) = recording_registry();

    let _handle = start_bridge_listener(port, registry)
        .await
        .expect("Failed to start bridge listener");
    tokio::time::sleep(LISTENER_SETTLE).await;

    let mut ws = connect_raw(port).await;
    send_frame(&mut ws, "this is not an envelope").await;
    send_frame(&mut ws, r#"{"channel":"button-clicked","payload":"recovered"}"#).await;

    let payload = recv_observed(&mut observed).await;
    assert_eq!(payload, ChannelPayload::ButtonClicked(String::from("recovered")));
}
