use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RegistryError {
    /// A handler is already bound to the channel and the registry was
    /// constructed with [`BindingPolicy::Reject`].
    ///
    /// [`BindingPolicy::Reject`]: crate::registry::BindingPolicy::Reject
    #[error("Already Bound: \"{channel}\" {location}")]
    AlreadyBound {
        channel: String,
        location: ErrorLocation,
    },
}
