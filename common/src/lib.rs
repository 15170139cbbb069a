//! Shared primitives for Caplink.
//!
//! This crate contains small building blocks used by every layer of the
//! application. Nothing in here knows about channels, handlers, or the
//! wire - it is the bottom of the dependency graph.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, redaction helpers
//! - **bridge-core**: the capability bridge operating on them
//! - **caplink**: application shell wiring everything together
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod error;
pub mod redacted_email;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use redacted_email::RedactedEmail;
