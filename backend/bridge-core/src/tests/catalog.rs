// Unit tests for the channel catalog and envelope codec.

use crate::catalog::{Channel, ChannelPayload, CreateUserData, Envelope};
use crate::error::catalog::CatalogError;

use serde_json::json;

/// **VALUE**: Verifies that every wire name in the catalog resolves to
/// its channel and back.
///
/// **WHY THIS MATTERS**: Channel names are the cross-process contract;
/// if `parse` and `as_str` disagree, the presentation process and the
/// registry silently stop talking about the same capabilities.
///
/// **BUG THIS CATCHES**: Would catch a renamed wire string on one side
/// of the `as_str`/`parse` pair, or a new variant missing from
/// `Channel::ALL`.
#[test]
fn given_every_catalog_channel_when_round_tripped_through_name_then_identity_holds() {
    for channel in Channel::ALL {
        assert_eq!(Channel::parse(channel.as_str()), Some(channel));
    }
}

/// **VALUE**: Verifies that names outside the catalog resolve to
/// nothing.
///
/// **WHY THIS MATTERS**: `parse` returning `None` is what makes
/// off-catalog capabilities unreachable - the isolation property rests
/// on it.
///
/// **BUG THIS CATCHES**: Would catch a `parse` fallback that maps
/// unknown names onto some default channel.
#[test]
fn given_unknown_channel_name_when_parsed_then_returns_none() {
    assert_eq!(Channel::parse("delete-user"), None);
    assert_eq!(Channel::parse(""), None);
    assert_eq!(Channel::parse("Create-User"), None);
}

/// **VALUE**: Verifies that encoding a create-user payload produces an
/// envelope carrying the right channel name and all fields.
///
/// **WHY THIS MATTERS**: The envelope is the only thing that crosses
/// the boundary. A missing field here is a silently corrupted
/// capability call on the host side.
///
/// **BUG THIS CATCHES**: Would catch a serde rename or skipped field
/// on `CreateUserData`, or `Envelope::encode` tagging the wrong
/// channel.
#[test]
fn given_create_user_payload_when_encoded_then_envelope_carries_channel_and_fields() {
    let payload = ChannelPayload::CreateUser(CreateUserData {
        email: String::from("ada@example.com"),
        name: String::from("Ada"),
    });

    let envelope = Envelope::encode(&payload).expect("encode should succeed");

    assert_eq!(envelope.channel, "create-user");
    assert_eq!(
        envelope.payload,
        json!({ "email": "ada@example.com", "name": "Ada" })
    );
}

/// **VALUE**: Verifies that a payload violating a channel's declared
/// shape fails to decode with `MalformedPayload`.
///
/// **WHY THIS MATTERS**: Decode is the validation boundary; a payload
/// that does not conform must never reach a handler; the drop happens
/// here, predictably, not inside some handler.
///
/// **BUG THIS CATCHES**: Would catch a decode path that passes raw
/// JSON through to handlers, or maps shape errors to the wrong
/// variant.
#[test]
fn given_wrong_payload_shape_when_decoded_then_malformed_payload_error() {
    let result = ChannelPayload::decode(Channel::CreateUser, &json!(42));

    match result {
        Err(CatalogError::MalformedPayload { channel, .. }) => {
            assert_eq!(channel, "create-user");
        }
        other => panic!("Expected MalformedPayload, got {other:?}"),
    }
}

/// **VALUE**: Verifies that the button-clicked payload is a bare
/// string, as the catalog declares.
///
/// **WHY THIS MATTERS**: The two channels have different payload
/// shapes; decode must select the shape by channel, not guess from the
/// value.
///
/// **BUG THIS CATCHES**: Would catch decode applying the create-user
/// shape to every channel.
#[test]
fn given_bare_string_when_decoded_on_button_clicked_then_payload_is_typed() {
    let decoded = ChannelPayload::decode(Channel::ButtonClicked, &json!("hello"))
        .expect("bare string should decode");

    assert_eq!(decoded, ChannelPayload::ButtonClicked(String::from("hello")));
}

/// **VALUE**: Verifies that a frame that is not an envelope at all is
/// rejected with a `Frame` error.
///
/// **WHY THIS MATTERS**: The wire feeds arbitrary bytes into
/// `Envelope::from_json`; garbage must be a diagnosable drop, not a
/// panic in the connection task.
///
/// **BUG THIS CATCHES**: Would catch an `unwrap` sneaking into the
/// frame parsing path.
#[test]
fn given_garbage_frame_when_parsed_then_frame_error() {
    assert!(matches!(
        Envelope::from_json("not json at all"),
        Err(CatalogError::Frame { .. })
    ));
}
