use common::ErrorLocation;

use bridge_core::error::BridgeError;

use thiserror::Error;

/// Errors that can occur in the application shell.
///
/// Bridge errors are flattened to their message here; the structured
/// variants with location tracking live in bridge-core.
#[derive(Debug, Error)]
pub enum CaplinkError {
    /// Error from this app's own wiring
    #[error("Caplink Error: {message} {location}")]
    Caplink {
        message: String,
        location: ErrorLocation,
    },

    /// Error from bridge-core operations (listener, connect, expose)
    #[error("Bridge Error: {message} {location}")]
    Bridge {
        message: String,
        location: ErrorLocation,
    },
}

impl From<BridgeError> for CaplinkError {
    #[track_caller]
    fn from(error: BridgeError) -> Self {
        CaplinkError::Bridge {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
