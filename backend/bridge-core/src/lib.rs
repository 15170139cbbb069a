//! Caplink bridge core.
//!
//! The capability-exposure bridge between the privileged host process
//! and the isolated presentation process:
//!
//! - [`catalog`] - the channel catalog, single source of truth for what
//!   may cross the boundary
//! - [`registry`] - host-side handler registry and dispatcher
//! - [`surface`] - the frozen exposed surface installed into the
//!   presentation process
//! - [`proxy`] - the fire-and-forget invocation path
//! - [`wire`] - the localhost WebSocket transport between the two ends
//! - [`host`] - the built-in host capabilities (create-user,
//!   button-clicked)
//!
//! All bridge logic lives here; the application shell only wires the
//! two ends together at startup.

pub mod catalog;
pub mod error;
pub mod host;
pub mod proxy;
pub mod registry;
pub mod surface;
pub mod wire;

#[cfg(test)]
mod tests;

/// The bridge binds to loopback only; the boundary is process
/// isolation, not the network.
pub const BRIDGE_HOSTNAME: &str = "127.0.0.1";

pub const BRIDGE_WS_BASE_URL: &str = const_format::concatcp!("ws://", BRIDGE_HOSTNAME);

/// Capacity of the bounded queues on both sides of the boundary.
pub const BRIDGE_QUEUE_CAPACITY: usize = 256;
