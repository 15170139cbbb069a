//! The message envelope, the only thing that crosses the boundary.
//!
//! An envelope is created transiently per call, serialized to a JSON
//! frame on the presentation side, and consumed within a single
//! delivery on the host side. It has no lifecycle beyond that.

use crate::catalog::ChannelPayload;
use crate::error::catalog::CatalogError;

use common::ErrorLocation;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A (channel, payload) pair in wire form.
///
/// The channel is carried as its raw wire name so that frames naming a
/// channel outside the catalog can still be decoded far enough to be
/// logged as a diagnosable drop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub channel: String,
    pub payload: Value,
}

impl Envelope {
    /// Build the envelope for a typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Encode`] if the payload fails to
    /// serialize.
    pub fn encode(payload: &ChannelPayload) -> Result<Self, CatalogError> {
        Ok(Self {
            channel: payload.channel().as_str().to_string(),
            payload: payload.to_value()?,
        })
    }

    /// Parse an envelope from a JSON frame.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Frame`] when the frame is not an
    /// envelope at all. Payload-shape problems are detected later, at
    /// dispatch.
    pub fn from_json(frame: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(frame).map_err(|e| CatalogError::Frame {
            message: e.to_string(),
            location: ErrorLocation::caller(),
        })
    }

    /// Serialize this envelope to a JSON frame.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string(self).map_err(|e| CatalogError::Encode {
            message: e.to_string(),
            location: ErrorLocation::caller(),
        })
    }
}
