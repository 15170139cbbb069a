//! The channel catalog: the wire contract between the two processes.
//!
//! Every capability that may cross the boundary is declared here, once.
//! Both ends of the bridge derive their shape from this module: the
//! registry dispatches on [`Channel`], the exposed surface and the
//! invocation proxy construct [`ChannelPayload`] values, and the
//! exhaustive matches over both enums make an orphaned capability on
//! either side a compile error rather than a runtime surprise.
//!
//! Channel names are immutable for the lifetime of a process pair and
//! no two capabilities share one.

mod envelope;

pub use envelope::Envelope;

use crate::error::catalog::CatalogError;

use common::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named capability identifier shared by both processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Records a new user on the host side.
    CreateUser,

    /// Logs a presentation-side interaction on the host side.
    ButtonClicked,
}

impl Channel {
    /// Every channel in the catalog, in declaration order.
    pub const ALL: [Channel; 2] = [Channel::CreateUser, Channel::ButtonClicked];

    /// The wire name of this channel.
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::CreateUser => "create-user",
            Channel::ButtonClicked => "button-clicked",
        }
    }

    /// Resolve a wire name back to a catalog entry.
    ///
    /// Returns `None` for names outside the catalog; callers decide
    /// whether that is a logged drop (dispatch) or an `Unavailable`
    /// error (surface).
    pub fn parse(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|channel| channel.as_str() == name)
    }
}

impl Display for Channel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

/// Payload shape of the create-user capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserData {
    pub email: String,
    pub name: String,
}

/// A decoded payload, tagged with the channel it belongs to.
///
/// One variant per catalog entry. Handlers receive exactly this type,
/// so a payload that fails to decode never reaches a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelPayload {
    CreateUser(CreateUserData),
    ButtonClicked(String),
}

impl ChannelPayload {
    /// The channel this payload travels on.
    pub fn channel(&self) -> Channel {
        match self {
            ChannelPayload::CreateUser(_) => Channel::CreateUser,
            ChannelPayload::ButtonClicked(_) => Channel::ButtonClicked,
        }
    }

    /// Decode a raw envelope payload against a channel's declared shape.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedPayload`] when the value does
    /// not conform to the channel's payload shape.
    pub fn decode(channel: Channel, payload: &Value) -> Result<Self, CatalogError> {
        match channel {
            Channel::CreateUser => serde_json::from_value::<CreateUserData>(payload.clone())
                .map(ChannelPayload::CreateUser)
                .map_err(|e| CatalogError::MalformedPayload {
                    channel: channel.as_str().to_string(),
                    message: e.to_string(),
                    location: ErrorLocation::caller(),
                }),
            Channel::ButtonClicked => serde_json::from_value::<String>(payload.clone())
                .map(ChannelPayload::ButtonClicked)
                .map_err(|e| CatalogError::MalformedPayload {
                    channel: channel.as_str().to_string(),
                    message: e.to_string(),
                    location: ErrorLocation::caller(),
                }),
        }
    }

    /// Encode this payload into the raw JSON form the envelope carries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Encode`] if serialization fails.
    pub fn to_value(&self) -> Result<Value, CatalogError> {
        let result = match self {
            ChannelPayload::CreateUser(data) => serde_json::to_value(data),
            ChannelPayload::ButtonClicked(message) => serde_json::to_value(message),
        };

        result.map_err(|e| CatalogError::Encode {
            message: e.to_string(),
            location: ErrorLocation::caller(),
        })
    }
}
