//! Webhook signature generation

use crate::{Result, WebhookHeaders, WebhookSecret};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Version tag emitted on generated signatures
pub const SIGNATURE_VERSION: &str = "v1";

/// Bytes the signature is computed over: `{id}.{timestamp}.{payload}`.
///
/// Header values and payload are used verbatim.
pub fn signed_content(id: &str, timestamp: &str, payload: &[u8]) -> Vec<u8> {
    let mut content = Vec::with_capacity(id.len() + timestamp.len() + payload.len() + 2);
    content.extend_from_slice(id.as_bytes());
    content.push(b'.');
    content.extend_from_slice(timestamp.as_bytes());
    content.push(b'.');
    content.extend_from_slice(payload);
    content
}

/// Base64-encoded HMAC-SHA256 of the signed content
pub fn compute_signature(key: &[u8], id: &str, timestamp: &str, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take any size key");
    mac.update(&signed_content(id, timestamp, payload));
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Produces Svix-compatible signatures for outgoing webhooks
#[derive(Clone)]
pub struct WebhookSigner {
    key: Vec<u8>,
}

impl WebhookSigner {
    /// Create a signer, decoding the secret once
    pub fn new(secret: impl Into<WebhookSecret>) -> Result<Self> {
        let key = secret.into().decode_key()?;
        Ok(Self { key })
    }

    /// Sign a message, returning a `v1,<base64>` entry
    pub fn sign(&self, id: &str, timestamp: i64, payload: &[u8]) -> String {
        let signature = compute_signature(&self.key, id, &timestamp.to_string(), payload);
        format!("{},{}", SIGNATURE_VERSION, signature)
    }

    /// Sign with a fresh message id and the current time
    pub fn sign_headers(&self, payload: &[u8]) -> WebhookHeaders {
        let id = format!("msg_{}", Uuid::new_v4().simple());
        self.sign_headers_at(&id, chrono::Utc::now().timestamp(), payload)
    }

    /// Build the full header triple for a given id and timestamp
    pub fn sign_headers_at(&self, id: &str, timestamp: i64, payload: &[u8]) -> WebhookHeaders {
        WebhookHeaders::new(id, timestamp.to_string(), self.sign(id, timestamp, payload))
    }
}

impl std::fmt::Debug for WebhookSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSigner").finish_non_exhaustive()
    }
}
