//! Caplink application shell.
//!
//! Wires the two ends of the bridge together at startup: the host side
//! (state, registry, listener) and the presentation side (connection,
//! exposed surface), then drives a couple of demonstration invocations
//! through the installed surface.
//!
//! All bridge logic lives in bridge-core; this binary only composes it.

use caplink::BRIDGE_PORT;
use caplink::error::CaplinkError;
use caplink::logger::initialize as LoggerInitialize;

use bridge_core::catalog::CreateUserData;
use bridge_core::error::BridgeError;
use bridge_core::host::{HostState, register_all};
use bridge_core::proxy::OverflowPolicy;
use bridge_core::registry::{BindingPolicy, HandlerRegistry};
use bridge_core::surface::{ExposedSurface, expose, surface};
use bridge_core::wire::{connect_bridge, start_bridge_listener};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::time::Duration;

use log::info;

#[tokio::main]
async fn main() -> Result<(), CaplinkError> {
    let log_dir = dirs::data_local_dir()
        .ok_or_else(|| CaplinkError::Caplink {
            message: String::from("No local data directory available for logs"),
            location: ErrorLocation::caller(),
        })?
        .join("caplink")
        .join("logs");

    create_dir_all(&log_dir).map_err(|e| CaplinkError::Caplink {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::caller(),
    })?;

    LoggerInitialize(&log_dir)?;

    info!("Caplink starting");
    info!("Log directory: {}", log_dir.display());

    // Host side: state, handlers, listener
    let host_state = HostState::new();
    let mut registry = HandlerRegistry::new(BindingPolicy::Reject);
    register_all(&mut registry, host_state.clone()).map_err(BridgeError::from)?;

    let _listener = start_bridge_listener(BRIDGE_PORT, registry)
        .await
        .map_err(BridgeError::from)?;
    info!("Bridge listener started on port {BRIDGE_PORT}");

    // Presentation side: connect and install the surface, exactly once
    let sender = connect_bridge(BRIDGE_PORT, OverflowPolicy::DropNewest)
        .await
        .map_err(BridgeError::from)?;
    expose(ExposedSurface::new(sender)).map_err(BridgeError::from)?;

    let exposed = surface().ok_or_else(|| CaplinkError::Caplink {
        message: String::from("Surface missing after installation"),
        location: ErrorLocation::caller(),
    })?;

    // Demonstration traffic through the one legitimate entry point
    exposed.create_user(CreateUserData {
        email: String::from("ada@example.com"),
        name: String::from("Ada Lovelace"),
    });
    exposed.button_clicked("hello from the presentation side");

    // Fire-and-forget: give the host a moment before reading state
    tokio::time::sleep(Duration::from_millis(250)).await;

    info!(
        "Host recorded {} user(s) and {} interaction(s)",
        host_state.users().await.len(),
        host_state.interactions().await.len()
    );

    Ok(())
}
