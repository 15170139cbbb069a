//! Log-safe handling of user email addresses.

use crate::{ErrorLocation, RedactError};

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// An email address that never exposes its full value in logs or debug
/// output.
///
/// Display masks the local part down to its first character, keeping
/// the domain visible for diagnostics (`a***@example.com`).
#[derive(Clone)]
pub struct RedactedEmail {
    inner: String,
}

impl RedactedEmail {
    /// Wrap an email address for logging.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            inner: email.into(),
        }
    }

    /// Get the actual address.
    ///
    /// Only call this when the address genuinely needs to leave the
    /// process, never for logging.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Length of the address (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the address is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedEmail([REDACTED])")
    }
}

impl fmt::Display for RedactedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.split_once('@') {
            Some((local, domain)) => {
                let mut chars = local.chars();
                match chars.next() {
                    Some(first) => write!(f, "{first}***@{domain}"),
                    None => write!(f, "***@{domain}"),
                }
            }
            None => write!(f, "[REDACTED EMAIL]"),
        }
    }
}

impl Drop for RedactedEmail {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedEmail {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from(
                "RedactedEmail cannot be serialized - use as_str() explicitly",
            ),
            location: ErrorLocation::caller(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::RedactedEmail;

    #[test]
    fn given_plain_address_when_displayed_then_local_part_is_masked() {
        let email = RedactedEmail::new("ada@example.com");
        assert_eq!(format!("{email}"), "a***@example.com");
    }

    #[test]
    fn given_string_without_at_sign_when_displayed_then_fully_redacted() {
        let email = RedactedEmail::new("not-an-email");
        assert_eq!(format!("{email}"), "[REDACTED EMAIL]");
    }

    #[test]
    fn given_any_address_when_debug_formatted_then_value_is_hidden() {
        let email = RedactedEmail::new("ada@example.com");
        let debug = format!("{email:?}");
        assert!(!debug.contains("ada@example.com"));
        assert!(debug.contains("REDACTED"));
    }
}
