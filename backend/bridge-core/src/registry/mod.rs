//! Host-side handler registry.
//!
//! The registry binds channel names to handler functions and is the
//! only component that knows which capability does what. It is an
//! explicit value: the bootstrap constructs one, registers handlers
//! through [`crate::host::register_all`], and hands ownership to the
//! dispatcher. After that hand-off nothing can mutate the mapping, so
//! steady-state dispatch is read-only by construction.
//!
//! # Lifecycle
//!
//! Per channel the bridge has exactly two states: unregistered
//! (initial) and active (after `register`, listening for the remainder
//! of the process pair's life). There is no deregistration; host and
//! presentation processes are created and torn down together.

mod context;
mod dispatch;

pub use context::{HandlerContext, SenderId};
pub use dispatch::{Inbound, dispatch_envelope, local_link, spawn_dispatcher};

use crate::catalog::{Channel, ChannelPayload};
use crate::error::registry::RegistryError;

use common::ErrorLocation;

use std::collections::HashMap;

use futures_util::future::BoxFuture;
use log::debug;
use tokio::sync::mpsc::UnboundedSender;

/// What a handler reports back to the dispatcher.
///
/// The bridge is fire-and-forget, so the built-in capabilities only
/// ever produce [`Dispatch::Pending`]; the other variants exist so
/// that adding acknowledgements later is not an interface break.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The capability completed and produced a value.
    Ok(serde_json::Value),

    /// The capability failed; the reason is logged and, when an ack
    /// sink is installed, forwarded there.
    Err(String),

    /// Fire-and-forget: the message was accepted, nothing is reported.
    Pending,
}

/// An acknowledgement forwarded to the optional ack sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    pub channel: Channel,
    pub outcome: Dispatch,
}

/// A bound handler: called with the sending-process context and the
/// decoded payload, returns its outcome asynchronously so a slow
/// capability can yield instead of blocking the dispatch loop.
pub type HandlerFn =
    Box<dyn Fn(HandlerContext, ChannelPayload) -> BoxFuture<'static, Dispatch> + Send + Sync>;

/// Per-channel payload validator, run after decode and before the
/// handler. Rejection drops the message with a warning.
pub type ValidatorFn = Box<dyn Fn(&ChannelPayload) -> Result<(), String> + Send + Sync>;

/// What `register` does when a channel is already bound.
///
/// An explicit construction-time choice rather than an accident of
/// call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPolicy {
    /// Second registration is a configuration error.
    Reject,

    /// Second registration deterministically replaces the first.
    Replace,

    /// Registrations accumulate; dispatch invokes all of them in
    /// registration order.
    FanOut,
}

/// The mapping from channel to handler, plus the optional per-channel
/// validators and the optional acknowledgement sink.
pub struct HandlerRegistry {
    policy: BindingPolicy,
    handlers: HashMap<Channel, Vec<HandlerFn>>,
    validators: HashMap<Channel, ValidatorFn>,
    ack_tx: Option<UnboundedSender<Ack>>,
}

impl HandlerRegistry {
    pub fn new(policy: BindingPolicy) -> Self {
        Self {
            policy,
            handlers: HashMap::new(),
            validators: HashMap::new(),
            ack_tx: None,
        }
    }

    /// Bind a handler to a channel.
    ///
    /// Channel membership in the catalog is enforced by the [`Channel`]
    /// type; there is no way to register a name outside it.
    ///
    /// # Errors
    ///
    /// Under [`BindingPolicy::Reject`], returns
    /// [`RegistryError::AlreadyBound`] if the channel already has a
    /// handler.
    #[track_caller]
    pub fn register(&mut self, channel: Channel, handler: HandlerFn) -> Result<(), RegistryError> {
        let bound = self.handlers.entry(channel).or_default();

        match self.policy {
            BindingPolicy::Reject if !bound.is_empty() => {
                return Err(RegistryError::AlreadyBound {
                    channel: channel.as_str().to_string(),
                    location: ErrorLocation::caller(),
                });
            }
            BindingPolicy::Replace => {
                bound.clear();
                bound.push(handler);
            }
            BindingPolicy::Reject | BindingPolicy::FanOut => {
                bound.push(handler);
            }
        }

        debug!("Registered handler for channel \"{channel}\"");
        Ok(())
    }

    /// Install a payload validator for a channel.
    ///
    /// At most one validator per channel; installing again replaces it.
    pub fn set_validator(&mut self, channel: Channel, validator: ValidatorFn) {
        self.validators.insert(channel, validator);
    }

    /// Install the acknowledgement sink.
    ///
    /// Non-`Pending` outcomes are forwarded there. Without a sink the
    /// bridge stays strictly fire-and-forget.
    pub fn set_ack_sink(&mut self, ack_tx: UnboundedSender<Ack>) {
        self.ack_tx = Some(ack_tx);
    }

    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }

    /// Whether a channel has at least one bound handler.
    pub fn is_bound(&self, channel: Channel) -> bool {
        self.handlers
            .get(&channel)
            .is_some_and(|bound| !bound.is_empty())
    }

    pub(crate) fn handlers_for(&self, channel: Channel) -> &[HandlerFn] {
        self.handlers
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn validator_for(&self, channel: Channel) -> Option<&ValidatorFn> {
        self.validators.get(&channel)
    }

    pub(crate) fn ack_sink(&self) -> Option<&UnboundedSender<Ack>> {
        self.ack_tx.as_ref()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new(BindingPolicy::Reject)
    }
}
