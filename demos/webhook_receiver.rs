//! Example: Receiving Email Webhooks
//!
//! Signs a sample delivery the way the email API would, then verifies and
//! dispatches it with a `WebhookReceiver`. Logging is controlled by
//! `RUST_LOG` (e.g. `RUST_LOG=mailhook_webhooks=debug`).
//!
//! Run with: `cargo run --example webhook_receiver`

use mailhook::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), WebhookError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let secret = WebhookSecret::generate();
    let signer = WebhookSigner::new(secret.clone())?;
    let receiver = WebhookReceiver::new(secret);

    let body = br#"{"type":"email.delivered","created_at":"2024-01-15T10:30:00Z","data":{"email_id":"4ef9a417-02e9-4d39-ad75-9611e0fcc33c"}}"#;
    let headers = signer.sign_headers(body);

    let handler = receiver.handler("email.*", |event| {
        tracing::info!(
            event_type = %event.event_type,
            email_id = event.email_id().unwrap_or("-"),
            "Handling email event"
        );
        Ok(())
    });

    let handled = handler.handle(body, Some(headers.clone()))?;
    tracing::info!(handled, "Genuine delivery processed");

    // A tampered body must be rejected; the HTTP layer would answer 400
    let tampered = br#"{"type":"email.delivered","created_at":"2024-01-15T10:30:00Z","data":{"email_id":"forged"}}"#;
    match handler.handle(tampered, Some(headers)) {
        Ok(_) => tracing::error!("Tampered delivery was accepted"),
        Err(err) => tracing::info!(category = %err.category(), "Tampered delivery rejected: {}", err),
    }

    Ok(())
}
