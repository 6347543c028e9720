//! Token Value
//!
//! Opaque secret handed to a user (usually inside an emailed link).
//! The value itself is never written to logs.

use platform::crypto::{constant_time_eq, fingerprint, random_token};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone)]
pub struct TokenValue(String);

impl TokenValue {
    /// Wrap a caller-supplied value. Uniqueness is the storage's job.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh random value carrying `bytes_len` bytes of entropy
    pub fn generate(bytes_len: usize) -> Self {
        Self(random_token(bytes_len))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Log-safe tag identifying this value
    pub fn fingerprint(&self) -> String {
        fingerprint(self.0.as_bytes())
    }
}

impl PartialEq for TokenValue {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl Eq for TokenValue {}

impl Hash for TokenValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenValue").field(&"[REDACTED]").finish()
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
