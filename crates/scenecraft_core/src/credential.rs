//! Engine credential wrapper.

use secrecy::{ExposeSecret, SecretString};

/// An opaque engine API key.
///
/// The value is held in a [`SecretString`] so it never shows up in `Debug`
/// output or logs.
///
/// # Examples
///
/// ```
/// use scenecraft_core::ApiKey;
///
/// let key = ApiKey::parse("  AIza-example  ").unwrap();
/// assert_eq!(key.expose(), "AIza-example");
/// assert!(!format!("{:?}", key).contains("AIza"));
/// assert!(ApiKey::parse("   ").is_none());
/// ```
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Trim the raw value and wrap it, rejecting blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(SecretString::from(trimmed.to_string())))
        }
    }

    /// Reveal the key for placing it on an outgoing request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
