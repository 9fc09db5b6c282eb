//! Secure secret handling using the secrecy crate
//!
//! The encryption key and the auth layer's signing secret pass through this
//! module. Secrets are zeroed from memory on drop and redacted from Debug
//! output; reading the value requires an explicit `expose_secret()` call.
//!
//! # Example
//!
//! ```rust
//! use medrecall::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("server-encryption-key".to_string());
//!
//! // Access only when needed
//! assert_eq!(key.expose_secret().as_ref(), "server-encryption-key");
//!
//! // Debug output is redacted
//! assert!(!format!("{key:?}").contains("encryption"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the traits `Secret` requires
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the secret value contains a substring
    ///
    /// Used by configuration validation to reject placeholder secrets
    /// without exposing the value.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
///
/// Wraps a `SecretValue` in a `Secret` container that zeros the memory when
/// dropped, prevents accidental logging via Debug, and requires explicit
/// `expose_secret()` to access.
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Helper function to create an optional SecretString from an optional String
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(|s| Secret::new(SecretValue::from(s)))
}
