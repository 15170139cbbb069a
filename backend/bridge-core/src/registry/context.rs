//! Host-side context handed to every handler invocation.

use std::fmt::{Display, Formatter, Result as FormatResult};

use uuid::Uuid;

/// Identity of a sending presentation process.
///
/// Assigned by the host when a connection (or local link) is
/// established; the presentation side cannot choose its own identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SenderId(Uuid);

impl SenderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SenderId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SenderId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.0)
    }
}

/// Contextual metadata a handler receives alongside its payload.
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext {
    /// Which presentation process sent the message.
    pub sender: SenderId,
}

impl HandlerContext {
    pub fn new(sender: SenderId) -> Self {
        Self { sender }
    }
}
