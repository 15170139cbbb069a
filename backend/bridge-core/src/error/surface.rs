use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SurfaceError {
    /// A surface is already installed; the installed surface is never
    /// replaceable.
    #[error("Already Exposed: surface installation attempted twice {location}")]
    AlreadyExposed { location: ErrorLocation },

    /// The requested capability name is not on the surface. This is the
    /// isolation boundary: nothing outside the catalog is reachable.
    #[error("Unavailable: no capability named \"{name}\" {location}")]
    Unavailable {
        name: String,
        location: ErrorLocation,
    },

    /// The payload does not conform to the capability's declared shape.
    #[error("Malformed Invocation of \"{name}\": {message} {location}")]
    Malformed {
        name: String,
        message: String,
        location: ErrorLocation,
    },
}
