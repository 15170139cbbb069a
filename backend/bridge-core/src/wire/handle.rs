//! Bridge listener handle type.

/// Handle to a running bridge listener.
///
/// Returned by [`start_bridge_listener`](crate::wire::start_bridge_listener)
/// and represents the background accept loop plus the dispatcher task.
///
/// # Lifecycle
///
/// Dropping this handle does **not** stop the listener; host and
/// presentation processes are torn down together, so the listener runs
/// until the process exits.
pub struct BridgeListenerHandle {}
