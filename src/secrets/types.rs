//! Redacting wrapper for secret values.
//!
//! Secret values travel through the store wrapped in [`SecretString`], so they
//! cannot leak through `Debug`, `Display`, or serialized log fields.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string whose contents are redacted everywhere except [`SecretString::expose_secret`].
///
/// # Security
///
/// - `Debug` prints `SecretString([REDACTED])`
/// - `Display` prints `[REDACTED]`
/// - Serialization writes `"[REDACTED]"`
/// - Deserialization accepts the real value, which is how snapshot documents are read
///
/// # Memory Safety
///
/// The buffer is zeroed on drop. Copies handed out by `expose_secret` callers
/// (e.g. `to_string()`) are not covered.
///
/// # Example
///
/// ```rust,ignore
/// use secretstore::secrets::SecretString;
///
/// let secret = SecretString::new("abc123");
/// assert_eq!(format!("{:?}", secret), "SecretString([REDACTED])");
/// assert_eq!(secret.expose_secret(), "abc123");
/// ```
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wraps a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the underlying value. Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Length of the value in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
