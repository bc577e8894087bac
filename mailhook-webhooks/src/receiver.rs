//! Webhook receiver for handling incoming webhooks

use std::collections::HashMap;

use crate::env::EnvLoader;
use crate::{
    Result, VerificationRequest, WebhookConfig, WebhookError, WebhookEvent, WebhookHeaders,
    WebhookSecret, WebhookVerifier,
};

/// Receiver for incoming webhooks.
///
/// Holds the endpoint secret and configuration explicitly; nothing is read
/// from process-wide state after construction.
#[derive(Debug, Clone)]
pub struct WebhookReceiver {
    secret: WebhookSecret,
    verifier: WebhookVerifier,
    config: WebhookConfig,
}

impl WebhookReceiver {
    /// Create a new receiver with the given secret
    pub fn new(secret: impl Into<WebhookSecret>) -> Self {
        Self::with_config(secret, WebhookConfig::default())
    }

    /// Create a receiver with custom configuration
    pub fn with_config(secret: impl Into<WebhookSecret>, config: WebhookConfig) -> Self {
        Self {
            secret: secret.into(),
            verifier: WebhookVerifier::with_tolerance(config.timestamp_tolerance),
            config,
        }
    }

    /// Build a receiver from `MAILHOOK_WEBHOOK_*` environment variables.
    ///
    /// `MAILHOOK_WEBHOOK_SECRET` is required.
    pub fn from_env() -> Result<Self> {
        Self::from_loader(&EnvLoader::default())
    }

    fn from_loader(env: &EnvLoader) -> Result<Self> {
        let secret = env
            .load_var("secret")
            .ok_or_else(|| WebhookError::Config("MAILHOOK_WEBHOOK_SECRET is not set".to_string()))?
            .to_string();
        let config = WebhookConfig::from_loader(env)?;
        Ok(Self::with_config(secret, config))
    }

    /// Set the timestamp tolerance in seconds
    pub fn with_tolerance(mut self, seconds: u64) -> Self {
        self.config.timestamp_tolerance = seconds;
        self.verifier = WebhookVerifier::with_tolerance(seconds);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Verify an incoming webhook signature
    pub fn verify(&self, payload: &[u8], headers: Option<WebhookHeaders>) -> Result<()> {
        let request = VerificationRequest::new(payload, headers, self.secret.clone());
        self.verifier.verify(&request).inspect_err(log_failure)
    }

    /// Verify signature from `(name, value)` header pairs
    pub fn verify_from_pairs<'a, I>(&self, payload: &[u8], headers: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.verify(payload, self.extract(headers))
    }

    /// Verify signature from HTTP headers
    pub fn verify_from_headers(
        &self,
        payload: &[u8],
        headers: &HashMap<String, String>,
    ) -> Result<()> {
        self.verify_from_pairs(
            payload,
            headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    /// Verify and parse an incoming webhook
    pub fn receive(&self, payload: &[u8], headers: Option<WebhookHeaders>) -> Result<WebhookEvent> {
        if payload.len() > self.config.max_payload_size {
            let err = WebhookError::PayloadTooLarge {
                size: payload.len(),
                limit: self.config.max_payload_size,
            };
            log_failure(&err);
            return Err(err);
        }

        // Verify signature first
        self.verify(payload, headers)?;

        // Parse the payload only once it is authentic
        let event: WebhookEvent = serde_json::from_slice(payload).inspect_err(|e| {
            tracing::warn!(error = %e, "Verified webhook payload is not a valid event");
        })?;
        tracing::debug!(event_type = %event.event_type, "Webhook received");
        Ok(event)
    }

    /// Receive and parse webhook from HTTP headers and body
    pub fn receive_from_request(
        &self,
        payload: &[u8],
        headers: &HashMap<String, String>,
    ) -> Result<WebhookEvent> {
        let headers = self.extract(headers.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        self.receive(payload, headers)
    }

    /// Create a handler for specific event types
    pub fn handler<F>(&self, event_filter: &str, callback: F) -> WebhookHandler<F>
    where
        F: Fn(WebhookEvent) -> Result<()>,
    {
        WebhookHandler {
            receiver: self.clone(),
            event_filter: event_filter.to_string(),
            callback,
        }
    }

    fn extract<'a, I>(&self, headers: I) -> Option<WebhookHeaders>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        WebhookHeaders::from_pairs_named(
            headers,
            &self.config.id_header,
            &self.config.timestamp_header,
            &self.config.signature_header,
        )
    }
}

fn log_failure(err: &WebhookError) {
    tracing::warn!(
        category = %err.category(),
        error = %err,
        "Webhook verification failed"
    );
}

/// A webhook handler that filters and processes specific events
pub struct WebhookHandler<F>
where
    F: Fn(WebhookEvent) -> Result<()>,
{
    receiver: WebhookReceiver,
    event_filter: String,
    callback: F,
}

impl<F> WebhookHandler<F>
where
    F: Fn(WebhookEvent) -> Result<()>,
{
    /// Handle an incoming webhook request
    pub fn handle(&self, payload: &[u8], headers: Option<WebhookHeaders>) -> Result<bool> {
        let event = self.receiver.receive(payload, headers)?;

        if !self.matches_event(event.event_type_str()) {
            return Ok(false);
        }

        (self.callback)(event)?;
        Ok(true)
    }

    /// Check if an event matches the filter
    fn matches_event(&self, event: &str) -> bool {
        if self.event_filter == "*" {
            return true;
        }

        if let Some(prefix) = self.event_filter.strip_suffix(".*") {
            return event
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('.'));
        }

        self.event_filter == event
    }
}
