//! Error types for webhook verification

use thiserror::Error;

/// Errors that can occur while verifying or receiving a webhook
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Request body was empty
    #[error("Webhook payload is required")]
    MissingPayload,

    /// No secret was supplied
    #[error("Webhook secret is required")]
    MissingSecret,

    /// None of the signing headers were present
    #[error("Webhook headers are required")]
    MissingHeaders,

    /// `svix-id` header missing or empty
    #[error("Webhook id header is required")]
    MissingId,

    /// `svix-timestamp` header missing or empty
    #[error("Webhook timestamp header is required")]
    MissingTimestamp,

    /// `svix-signature` header missing or empty
    #[error("Webhook signature header is required")]
    MissingSignature,

    /// Timestamp header is not a base-10 integer
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    /// Timestamp is too far from the verifier's clock
    #[error(
        "Timestamp outside tolerance window: difference of {diff} seconds exceeds {tolerance} seconds"
    )]
    TimestampOutOfTolerance { diff: i64, tolerance: u64 },

    /// Secret is not valid base64 after the `whsec_` prefix
    #[error("Failed to decode webhook secret: {0}")]
    SecretDecode(#[from] base64::DecodeError),

    /// No signature entry matched the expected signature
    #[error("No matching signature found")]
    NoMatchingSignature,

    /// Payload exceeds the configured size limit
    #[error("Payload of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Payload verified but could not be parsed
    #[error("Payload error: {0}")]
    Payload(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::Payload(err.to_string())
    }
}

/// Coarse grouping of [`WebhookError`] for operators.
///
/// Misconfiguration (`Input`, `Config`) should be told apart from requests
/// that look forged or replayed (`Format`, `Temporal`, `Authentication`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller or operator supplied incomplete input
    Input,
    /// Request carried a malformed value
    Format,
    /// Timestamp outside the tolerance window
    Temporal,
    /// Signature did not match
    Authentication,
    /// Verified payload was unusable
    Payload,
    /// Configuration could not be loaded
    Config,
}

impl ErrorCategory {
    /// Stable lowercase name, suitable for log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Format => "format",
            Self::Temporal => "temporal",
            Self::Authentication => "authentication",
            Self::Payload => "payload",
            Self::Config => "config",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WebhookError {
    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPayload
            | Self::MissingSecret
            | Self::MissingHeaders
            | Self::MissingId
            | Self::MissingTimestamp
            | Self::MissingSignature
            | Self::SecretDecode(_) => ErrorCategory::Input,
            Self::InvalidTimestamp(_) => ErrorCategory::Format,
            Self::TimestampOutOfTolerance { .. } => ErrorCategory::Temporal,
            Self::NoMatchingSignature => ErrorCategory::Authentication,
            Self::PayloadTooLarge { .. } | Self::Payload(_) => ErrorCategory::Payload,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Whether this error came from the verification step itself
    pub fn is_verification_failure(&self) -> bool {
        !matches!(
            self.category(),
            ErrorCategory::Payload | ErrorCategory::Config
        )
    }
}
