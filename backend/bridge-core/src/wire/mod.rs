//! The process boundary: localhost WebSocket transport.
//!
//! The host process listens on `127.0.0.1` only; the presentation
//! process connects and sends JSON [`Envelope`] frames. Delivery is
//! asynchronous relative to the sender and FIFO per connection, which
//! gives the per-channel ordering guarantee. Traffic is one-way: the
//! bridge is fire-and-forget, so the host never writes back.
//!
//! There is no authentication handshake; isolation comes from the
//! loopback-only binding and from the surface exposing nothing beyond
//! the catalog.
//!
//! [`Envelope`]: crate::catalog::Envelope

mod client;
mod handle;
mod server;

pub use client::connect_bridge;
pub use handle::BridgeListenerHandle;
pub use server::start_bridge_listener;
