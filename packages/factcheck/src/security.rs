//! Redacting wrapper for search-provider API keys.
//!
//! Keys read from configuration pass through builders, error messages, and
//! structured log fields on their way to a request. [`SecretString`] keeps
//! them out of all of those: both `Debug` and `Display` print a fixed
//! placeholder, and the backing memory is zeroized on drop by `secrecy`.

use std::fmt;

use secrecy::{ExposeSecret, SecretBox};

const REDACTED: &str = "[REDACTED]";

/// An API key or other credential that never formats to its value.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Read the underlying value at the point it is actually sent, e.g.
    /// when building the provider request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

// SecretBox is deliberately not Clone; re-wrap the exposed value instead.
impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_never_leaks_the_key() {
        let key = SecretString::new("google-cse-key-123");
        assert_eq!(format!("{key:?}"), "[REDACTED]");
        assert_eq!(format!("{key}"), "[REDACTED]");
    }

    #[test]
    fn test_expose_and_clone_round_trip() {
        let key = SecretString::new("google-cse-key-123");
        assert_eq!(key.clone().expose(), "google-cse-key-123");
    }
}
