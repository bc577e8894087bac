//! Webhook signing secrets

use crate::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

/// Literal prefix carried by provisioned secrets
pub const SECRET_PREFIX: &str = "whsec_";

/// A shared webhook secret in `whsec_<base64>` form.
///
/// The prefix is optional; a bare base64 string is accepted as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    /// Wrap a secret string
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Build a secret from raw key bytes
    pub fn from_key_bytes(key: &[u8]) -> Self {
        Self(format!("{}{}", SECRET_PREFIX, STANDARD.encode(key)))
    }

    /// Generate a fresh random 24-byte secret
    pub fn generate() -> Self {
        let mut key = Vec::with_capacity(32);
        key.extend_from_slice(Uuid::new_v4().as_bytes());
        key.extend_from_slice(Uuid::new_v4().as_bytes());
        key.truncate(24);
        Self::from_key_bytes(&key)
    }

    /// The secret as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode the HMAC key bytes.
    ///
    /// Exactly one leading `whsec_` is stripped before base64 decoding.
    pub fn decode_key(&self) -> Result<Vec<u8>> {
        let encoded = self.0.strip_prefix(SECRET_PREFIX).unwrap_or(&self.0);
        Ok(STANDARD.decode(encoded)?)
    }
}

impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

impl From<&str> for WebhookSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for WebhookSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}
