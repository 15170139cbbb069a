use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProxyError {
    /// The outbound queue is full and the sender was configured with
    /// [`OverflowPolicy::RejectSender`].
    ///
    /// [`OverflowPolicy::RejectSender`]: crate::proxy::OverflowPolicy::RejectSender
    #[error("Queue Full: outbound bridge queue at capacity {location}")]
    QueueFull { location: ErrorLocation },

    /// The receiving end of the bridge is gone.
    #[error("Disconnected: bridge receiver dropped {location}")]
    Disconnected { location: ErrorLocation },
}
