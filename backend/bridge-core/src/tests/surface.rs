// Unit tests for the exposed surface: key-set contract, isolation,
// and the once-only global installation.

use crate::BRIDGE_QUEUE_CAPACITY;
use crate::catalog::{Channel, ChannelPayload, CreateUserData};
use crate::error::surface::SurfaceError;
use crate::proxy::OverflowPolicy;
use crate::registry::{BindingPolicy, Dispatch, HandlerRegistry, local_link};
use crate::surface::{ExposedSurface, expose, surface};

use futures_util::FutureExt;
use serde_json::json;
use serial_test::serial;
use tokio::sync::mpsc;

/// Registry whose only handler forwards observed payloads to a test
/// channel, paired with an in-process link.
async fn linked_surface() -> (ExposedSurface, mpsc::UnboundedReceiver<ChannelPayload>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut registry = HandlerRegistry::new(BindingPolicy::FanOut);

    for channel in Channel::ALL {
        let tx = tx.clone();
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
            .expect("registration should succeed");
    }

    let (sender, _task) = local_link(registry, BRIDGE_QUEUE_CAPACITY, OverflowPolicy::DropNewest);
    (ExposedSurface::new(sender), rx)
}

/// **VALUE**: Verifies that the surface's capability names equal the
/// channel catalog exactly.
///
/// **WHY THIS MATTERS**: Surface/proxy/catalog key-set equality is the
/// cross-process type contract: an orphaned capability on either side
/// means calls that can never land.
///
/// **BUG THIS CATCHES**: Would catch `capability_names` drifting from
/// `Channel::ALL` after a catalog change.
#[test]
fn given_surface_when_capability_names_listed_then_equal_to_catalog() {
    let names = ExposedSurface::capability_names();

    assert_eq!(names.len(), Channel::ALL.len());
    for channel in Channel::ALL {
        assert!(names.contains(&channel.as_str()));
    }
}

/// **VALUE**: Verifies that invoking a name outside the catalog fails
/// with `Unavailable`.
///
/// **WHY THIS MATTERS**: This is the isolation boundary itself: the
/// presentation process must have no path to a host capability except
/// by catalog name. Anything else is a capability leak.
///
/// **BUG THIS CATCHES**: Would catch `invoke_raw` forwarding unknown
/// names to the transport for the host to sort out.
#[tokio::test]
async fn given_off_catalog_name_when_invoked_raw_then_unavailable() {
    let (surface, mut rx) = linked_surface().await;

    let result = surface.invoke_raw("read-host-files", json!(null));

    match result {
        Err(SurfaceError::Unavailable { name, .. }) => assert_eq!(name, "read-host-files"),
        other => panic!("Expected Unavailable, got {other:?}"),
    }
    assert!(rx.try_recv().is_err(), "Nothing may cross the boundary");
}

/// **VALUE**: Verifies that a raw invocation with a non-conforming
/// payload fails with `Malformed` and sends nothing.
///
/// **WHY THIS MATTERS**: The surface enforces payload shapes before
/// the message leaves the presentation process, so the host never
/// spends dispatch work on garbage a stub could have rejected.
///
/// **BUG THIS CATCHES**: Would catch `invoke_raw` skipping the typed
/// decode and shipping raw JSON.
#[tokio::test]
async fn given_malformed_payload_when_invoked_raw_then_malformed_and_nothing_sent() {
    let (surface, mut rx) = linked_surface().await;

    let result = surface.invoke_raw("create-user", json!("not an object"));

    assert!(matches!(result, Err(SurfaceError::Malformed { .. })));
    assert!(rx.try_recv().is_err());
}

/// **VALUE**: Verifies that a valid raw invocation reaches the handler
/// with the exact typed payload.
///
/// **WHY THIS MATTERS**: `invoke_raw` is the dynamic path callers use
/// when addressing capabilities by string; it must marshal identically
/// to the typed stubs.
///
/// **BUG THIS CATCHES**: Would catch the raw path diverging from the
/// typed path in channel tagging or field mapping.
#[tokio::test]
async fn given_valid_raw_invocation_when_dispatched_then_handler_observes_typed_payload() {
    let (surface, mut rx) = linked_surface().await;

    surface
        .invoke_raw("create-user", json!({ "email": "a@b.com", "name": "Ada" }))
        .expect("valid invocation should be accepted");

    let observed = rx.recv().await.expect("handler should observe the payload");
    assert_eq!(
        observed,
        ChannelPayload::CreateUser(CreateUserData {
            email: String::from("a@b.com"),
            name: String::from("Ada"),
        })
    );
}

/// **VALUE**: Verifies that the global surface installs exactly once
/// and rejects replacement.
///
/// **WHY THIS MATTERS**: The installed surface must never be
/// replaceable - a buggy or compromised presentation component must
/// not be able to swap in an impostor surface after startup.
///
/// **BUG THIS CATCHES**: Would catch `expose` silently overwriting the
/// global binding on a second call.
#[tokio::test]
#[serial]
async fn given_surface_exposed_when_exposed_again_then_replacement_rejected() {
    let (first, _rx_first) = linked_surface().await;
    let (second, _rx_second) = linked_surface().await;

    // First installation wins, whether or not an earlier serial test
    // already installed one in this process.
    let _ = expose(first);
    assert!(surface().is_some(), "A surface must be installed");

    assert!(matches!(
        expose(second),
        Err(SurfaceError::AlreadyExposed { .. })
    ));
    assert!(surface().is_some(), "Rejected replacement must not uninstall");
}
