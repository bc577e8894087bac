//! Signing headers and the verification request

use std::collections::HashMap;

use crate::WebhookSecret;

/// Header names used by the Svix signing convention
pub mod names {
    /// Message identifier
    pub const ID: &str = "svix-id";

    /// Unix timestamp in seconds
    pub const TIMESTAMP: &str = "svix-timestamp";

    /// Space-separated `<version>,<signature>` list
    pub const SIGNATURE: &str = "svix-signature";
}

/// The three values a webhook delivery is signed with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookHeaders {
    /// Opaque message identifier
    pub id: String,

    /// Decimal Unix seconds at signing time
    pub timestamp: String,

    /// Space-separated signature entries
    pub signature: String,
}

impl WebhookHeaders {
    /// Create a header triple
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            signature: signature.into(),
        }
    }

    /// Extract the signing headers from `(name, value)` pairs.
    ///
    /// Names match case-insensitively. Returns `None` when none of the three
    /// headers is present; a partially present set keeps empty strings for
    /// the missing values.
    pub fn from_pairs<'a, I>(headers: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::from_pairs_named(headers, names::ID, names::TIMESTAMP, names::SIGNATURE)
    }

    /// Like [`WebhookHeaders::from_pairs`] with custom header names
    pub fn from_pairs_named<'a, I>(
        headers: I,
        id_header: &str,
        timestamp_header: &str,
        signature_header: &str,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut id = None;
        let mut timestamp = None;
        let mut signature = None;

        for (name, value) in headers {
            if name.eq_ignore_ascii_case(id_header) {
                id = Some(value.to_string());
            } else if name.eq_ignore_ascii_case(timestamp_header) {
                timestamp = Some(value.to_string());
            } else if name.eq_ignore_ascii_case(signature_header) {
                signature = Some(value.to_string());
            }
        }

        if id.is_none() && timestamp.is_none() && signature.is_none() {
            return None;
        }

        Some(Self {
            id: id.unwrap_or_default(),
            timestamp: timestamp.unwrap_or_default(),
            signature: signature.unwrap_or_default(),
        })
    }

    /// Extract the signing headers from a header map
    pub fn from_map(headers: &HashMap<String, String>) -> Option<Self> {
        Self::from_pairs(headers.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Header pairs ready to attach to an outgoing request
    pub fn to_pairs(&self) -> [(&'static str, &str); 3] {
        [
            (names::ID, self.id.as_str()),
            (names::TIMESTAMP, self.timestamp.as_str()),
            (names::SIGNATURE, self.signature.as_str()),
        ]
    }
}

/// Everything needed to verify one webhook delivery.
///
/// `payload` must be the body exactly as received, before any JSON parsing.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    /// Raw request body
    pub payload: Vec<u8>,

    /// Signing headers, if the transport carried any
    pub headers: Option<WebhookHeaders>,

    /// Shared secret for this endpoint
    pub webhook_secret: WebhookSecret,
}

impl VerificationRequest {
    /// Create a request from its parts
    pub fn new(
        payload: impl Into<Vec<u8>>,
        headers: Option<WebhookHeaders>,
        webhook_secret: impl Into<WebhookSecret>,
    ) -> Self {
        Self {
            payload: payload.into(),
            headers,
            webhook_secret: webhook_secret.into(),
        }
    }
}
