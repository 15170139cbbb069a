//! Built-in host capabilities.
//!
//! The side-effecting operations the host process owns: recording a
//! user and logging an interaction. Each capability lives in its own
//! module; this file is the single aggregation point the bootstrap
//! invokes.

mod interactions;
mod state;
mod users;

pub use state::{HostCommand, HostState, UserRecord};

use crate::catalog::Channel;
use crate::error::registry::RegistryError;
use crate::registry::HandlerRegistry;

/// Bind every built-in capability to its channel.
///
/// This is the only thing the host bootstrap needs to know about the
/// handler modules. New capabilities get registered here.
///
/// # Errors
///
/// Returns [`RegistryError::AlreadyBound`] if a channel is already
/// bound under a rejecting policy - a configuration error, since this
/// should run once at startup.
pub fn register_all(registry: &mut HandlerRegistry, state: HostState) -> Result<(), RegistryError> {
    registry.set_validator(Channel::CreateUser, users::create_user_validator());
    registry.register(Channel::CreateUser, users::create_user_handler(state.clone()))?;
    registry.register(
        Channel::ButtonClicked,
        interactions::button_clicked_handler(state),
    )?;

    Ok(())
}
