// Mailhook - companion crate for a transactional email API
//
// This library verifies and decodes the webhooks the email API delivers.
// Member crates are re-exported behind features.

#[cfg(feature = "webhooks")]
pub use mailhook_webhooks as webhooks;

// Prelude for common imports
#[cfg(feature = "webhooks")]
pub mod prelude {
    pub use crate::webhooks::{
        EmailEventType, ErrorCategory, VerificationRequest, WebhookConfig, WebhookError,
        WebhookEvent, WebhookHeaders, WebhookReceiver, WebhookSecret, WebhookSigner,
        WebhookVerifier, verify,
    };
}
