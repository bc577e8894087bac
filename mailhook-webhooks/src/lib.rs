//! Webhook verification for Mailhook
//!
//! This crate authenticates inbound webhook deliveries from the email API.
//! Deliveries are signed with HMAC-SHA256 following the Svix convention:
//! the signature covers `{svix-id}.{svix-timestamp}.{body}` and is sent as a
//! space-separated list of `<version>,<base64>` entries.
//!
//! # Features
//!
//! - **Signature Verification**: HMAC-SHA256 with constant-time comparison
//! - **Replay Protection**: Symmetric 5 minute timestamp tolerance window
//! - **Multiple Signatures**: Any matching entry in the signature header passes
//! - **Signing**: Generate compatible headers for tests or relays
//! - **Typed Events**: Parse verified payloads into [`WebhookEvent`]
//!
//! # Example: Verifying a Delivery
//!
//! ```rust,no_run
//! use mailhook_webhooks::{VerificationRequest, WebhookHeaders, verify};
//!
//! let body = br#"{"type":"email.sent","data":{"email_id":"123"}}"#;
//! let headers = WebhookHeaders::new("msg_123", "1700000000", "v1,K5oZfzN95Z9UVu1EsfQmfVNQhnkZ2pj9o9NDN/H/pI4=");
//!
//! let request = VerificationRequest::new(body.to_vec(), Some(headers), "whsec_dGVzdF9zZWNyZXRfa2V5");
//! verify(&request)?;
//! # Ok::<(), mailhook_webhooks::WebhookError>(())
//! ```
//!
//! # Example: Receiving Webhooks
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use mailhook_webhooks::WebhookReceiver;
//!
//! let receiver = WebhookReceiver::new("whsec_dGVzdF9zZWNyZXRfa2V5");
//!
//! let body = br#"{"type":"email.delivered","data":{"email_id":"123"}}"#;
//! let headers: HashMap<String, String> = HashMap::new();
//!
//! match receiver.receive_from_request(body, &headers) {
//!     Ok(event) => println!("got {}", event.event_type),
//!     Err(_) => { /* respond 400 without detail */ }
//! }
//! ```

mod config;
mod env;
mod error;
mod event;
mod headers;
mod receiver;
mod secret;
mod signature;
mod verifier;

pub use config::{WebhookConfig, WebhookConfigBuilder};
pub use env::{ENV_PREFIX, EnvLoader};
pub use error::{ErrorCategory, WebhookError};
pub use event::{EmailEventType, WebhookEvent};
pub use headers::{VerificationRequest, WebhookHeaders, names as header_names};
pub use receiver::{WebhookHandler, WebhookReceiver};
pub use secret::{SECRET_PREFIX, WebhookSecret};
pub use signature::{SIGNATURE_VERSION, WebhookSigner, compute_signature, signed_content};
pub use verifier::{DEFAULT_TOLERANCE_SECS, WebhookVerifier, verify};

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;
