//! Configuration for webhook receiving

use crate::env::EnvLoader;
use crate::headers::names;
use crate::verifier::DEFAULT_TOLERANCE_SECS;
use crate::{Result, WebhookError};

/// Configuration for the webhook receiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Timestamp tolerance for signature verification (in seconds)
    pub timestamp_tolerance: u64,

    /// Maximum payload size in bytes
    pub max_payload_size: usize,

    /// Message id header name
    pub id_header: String,

    /// Timestamp header name
    pub timestamp_header: String,

    /// Signature header name
    pub signature_header: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            timestamp_tolerance: DEFAULT_TOLERANCE_SECS,
            max_payload_size: 1024 * 1024, // 1MB
            id_header: names::ID.to_string(),
            timestamp_header: names::TIMESTAMP.to_string(),
            signature_header: names::SIGNATURE.to_string(),
        }
    }
}

impl WebhookConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> WebhookConfigBuilder {
        WebhookConfigBuilder::new()
    }

    /// Load overrides from `MAILHOOK_WEBHOOK_*` environment variables.
    ///
    /// - `MAILHOOK_WEBHOOK_TOLERANCE` - tolerance in seconds
    /// - `MAILHOOK_WEBHOOK_MAX_PAYLOAD` - payload limit in bytes
    pub fn from_env() -> Result<Self> {
        Self::from_loader(&EnvLoader::default())
    }

    pub(crate) fn from_loader(env: &EnvLoader) -> Result<Self> {
        let mut config = Self::default();

        if let Some(tolerance) = env.load_parsed::<u64>("tolerance")? {
            config.timestamp_tolerance = tolerance;
        }
        if let Some(max) = env.load_parsed::<usize>("max_payload")? {
            if max == 0 {
                return Err(WebhookError::Config(
                    "MAILHOOK_WEBHOOK_MAX_PAYLOAD must be greater than zero".to_string(),
                ));
            }
            config.max_payload_size = max;
        }

        tracing::debug!(
            tolerance = config.timestamp_tolerance,
            max_payload_size = config.max_payload_size,
            "Loaded webhook configuration"
        );
        Ok(config)
    }
}

/// Builder for WebhookConfig
#[derive(Debug, Clone, Default)]
pub struct WebhookConfigBuilder {
    config: WebhookConfig,
}

impl WebhookConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: WebhookConfig::default(),
        }
    }

    /// Set timestamp tolerance for signature verification
    pub fn timestamp_tolerance(mut self, seconds: u64) -> Self {
        self.config.timestamp_tolerance = seconds;
        self
    }

    /// Set maximum payload size
    pub fn max_payload_size(mut self, size: usize) -> Self {
        self.config.max_payload_size = size;
        self
    }

    /// Use custom header names, for proxies that rename them
    pub fn header_names(
        mut self,
        id: impl Into<String>,
        timestamp: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        self.config.id_header = id.into();
        self.config.timestamp_header = timestamp.into();
        self.config.signature_header = signature.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> WebhookConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ENV_PREFIX;

    #[test]
    fn test_default_config() {
        let config = WebhookConfig::default();
        assert_eq!(config.timestamp_tolerance, 300);
        assert_eq!(config.max_payload_size, 1024 * 1024);
        assert_eq!(config.signature_header, "svix-signature");
    }

    #[test]
    fn test_builder() {
        let config = WebhookConfig::builder()
            .timestamp_tolerance(60)
            .max_payload_size(2048)
            .header_names("webhook-id", "webhook-timestamp", "webhook-signature")
            .build();

        assert_eq!(config.timestamp_tolerance, 60);
        assert_eq!(config.max_payload_size, 2048);
        assert_eq!(config.id_header, "webhook-id");
    }

    #[test]
    fn test_from_loader() {
        let env = EnvLoader::from_vars(
            ENV_PREFIX,
            [
                ("MAILHOOK_WEBHOOK_TOLERANCE", "90"),
                ("MAILHOOK_WEBHOOK_MAX_PAYLOAD", "4096"),
            ],
        );
        let config = WebhookConfig::from_loader(&env).unwrap();
        assert_eq!(config.timestamp_tolerance, 90);
        assert_eq!(config.max_payload_size, 4096);
    }

    #[test]
    fn test_from_loader_defaults() {
        let env = EnvLoader::from_vars(ENV_PREFIX, Vec::<(String, String)>::new());
        assert_eq!(WebhookConfig::from_loader(&env).unwrap(), WebhookConfig::default());
    }

    #[test]
    fn test_from_loader_rejects_zero_payload() {
        let env = EnvLoader::from_vars(ENV_PREFIX, [("MAILHOOK_WEBHOOK_MAX_PAYLOAD", "0")]);
        assert!(matches!(
            WebhookConfig::from_loader(&env),
            Err(WebhookError::Config(_))
        ));
    }
}
