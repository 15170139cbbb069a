//! The exposed surface: the sole entry point into host capabilities.
//!
//! [`ExposedSurface`] is the frozen object the presentation process
//! calls. It is immutable by construction - the sending half is a
//! private field and the API is methods only, so there is no way to
//! add, remove, or reassign a capability after the surface is built.
//!
//! [`expose`] installs a surface into the process-global binding
//! exactly once. A second installation is rejected: a compromised or
//! buggy presentation component must not be able to swap in an
//! impostor surface.
//!
//! The method set is tied to the channel catalog by the exhaustive
//! `match` in [`ExposedSurface::invoke_raw`]: adding a channel without
//! a corresponding capability method is a compile error, which is the
//! whole cross-process contract - no second, hand-written declaration
//! to drift out of sync.

use crate::catalog::{Channel, ChannelPayload, CreateUserData};
use crate::error::surface::SurfaceError;
use crate::proxy::{BridgeSender, invoke};

use common::ErrorLocation;

use log::{info, warn};
use once_cell::sync::OnceCell;
use serde_json::Value;

static SURFACE: OnceCell<ExposedSurface> = OnceCell::new();

/// The immutable mapping from capability name to invocation function.
///
/// Constructed once per process-pair lifetime, installed with
/// [`expose`], and read-only thereafter.
pub struct ExposedSurface {
    sender: BridgeSender,
}

impl ExposedSurface {
    pub fn new(sender: BridgeSender) -> Self {
        Self { sender }
    }

    /// The capability names on this surface, equal by construction to
    /// the channel catalog.
    pub fn capability_names() -> [&'static str; Channel::ALL.len()] {
        Channel::ALL.map(|channel| channel.as_str())
    }

    /// Ask the host to record a new user. Fire-and-forget.
    pub fn create_user(&self, data: CreateUserData) {
        invoke(&self.sender, ChannelPayload::CreateUser(data));
    }

    /// Report an interaction to the host. Fire-and-forget.
    pub fn button_clicked(&self, message: impl Into<String>) {
        invoke(&self.sender, ChannelPayload::ButtonClicked(message.into()));
    }

    /// Invoke a capability by its wire name with a raw JSON payload.
    ///
    /// The dynamic entry point for callers that address capabilities
    /// by string. Anything outside the catalog is unreachable.
    ///
    /// # Errors
    ///
    /// - [`SurfaceError::Unavailable`] - no capability with that name
    /// - [`SurfaceError::Malformed`] - payload does not conform to the
    ///   capability's declared shape
    #[track_caller]
    pub fn invoke_raw(&self, name: &str, payload: Value) -> Result<(), SurfaceError> {
        let Some(channel) = Channel::parse(name) else {
            return Err(SurfaceError::Unavailable {
                name: name.to_string(),
                location: ErrorLocation::caller(),
            });
        };

        let typed = ChannelPayload::decode(channel, &payload).map_err(|e| {
            SurfaceError::Malformed {
                name: name.to_string(),
                message: e.to_string(),
                location: ErrorLocation::caller(),
            }
        })?;

        // Exhaustiveness here is the surface/catalog key-set contract.
        match typed {
            payload @ ChannelPayload::CreateUser(_) => invoke(&self.sender, payload),
            payload @ ChannelPayload::ButtonClicked(_) => invoke(&self.sender, payload),
        }

        Ok(())
    }
}

/// Install the surface into the process-global binding.
///
/// Must be called exactly once, before any presentation component
/// runs. The installed surface is never replaceable.
///
/// # Errors
///
/// Returns [`SurfaceError::AlreadyExposed`] if a surface is already
/// installed; the existing surface stays in place.
#[track_caller]
pub fn expose(surface: ExposedSurface) -> Result<(), SurfaceError> {
    if SURFACE.set(surface).is_err() {
        warn!("Exposed surface already installed; replacement attempt rejected");
        return Err(SurfaceError::AlreadyExposed {
            location: ErrorLocation::caller(),
        });
    }

    info!(
        "Exposed surface installed with capabilities {:?}",
        ExposedSurface::capability_names()
    );
    Ok(())
}

/// The installed surface, if [`expose`] has run.
pub fn surface() -> Option<&'static ExposedSurface> {
    SURFACE.get()
}
