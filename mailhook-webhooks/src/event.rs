//! Webhook event envelope

use serde::{Deserialize, Serialize};

/// A verified webhook event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event type (e.g., "email.sent", "contact.updated")
    #[serde(rename = "type")]
    pub event_type: EmailEventType,

    /// When the event was created, as sent by the API
    #[serde(default)]
    pub created_at: String,

    /// Event-specific data
    #[serde(default)]
    pub data: serde_json::Value,
}

impl WebhookEvent {
    /// Event type as sent on the wire
    pub fn event_type_str(&self) -> &str {
        self.event_type.as_str()
    }

    /// `data.email_id`, present on all email events
    pub fn email_id(&self) -> Option<&str> {
        self.data.get("email_id").and_then(|v| v.as_str())
    }
}

/// Known event types; anything else is kept verbatim in `Other`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmailEventType {
    EmailSent,
    EmailDelivered,
    EmailDeliveryDelayed,
    EmailComplained,
    EmailBounced,
    EmailOpened,
    EmailClicked,
    EmailFailed,
    EmailScheduled,
    EmailReceived,
    ContactCreated,
    ContactUpdated,
    ContactDeleted,
    DomainCreated,
    DomainUpdated,
    DomainDeleted,
    Other(String),
}

impl EmailEventType {
    /// Wire name of the event type
    pub fn as_str(&self) -> &str {
        match self {
            Self::EmailSent => "email.sent",
            Self::EmailDelivered => "email.delivered",
            Self::EmailDeliveryDelayed => "email.delivery_delayed",
            Self::EmailComplained => "email.complained",
            Self::EmailBounced => "email.bounced",
            Self::EmailOpened => "email.opened",
            Self::EmailClicked => "email.clicked",
            Self::EmailFailed => "email.failed",
            Self::EmailScheduled => "email.scheduled",
            Self::EmailReceived => "email.received",
            Self::ContactCreated => "contact.created",
            Self::ContactUpdated => "contact.updated",
            Self::ContactDeleted => "contact.deleted",
            Self::DomainCreated => "domain.created",
            Self::DomainUpdated => "domain.updated",
            Self::DomainDeleted => "domain.deleted",
            Self::Other(s) => s,
        }
    }

    /// Whether this is one of the `email.*` events
    pub fn is_email_event(&self) -> bool {
        self.as_str().starts_with("email.")
    }
}

impl From<String> for EmailEventType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "email.sent" => Self::EmailSent,
            "email.delivered" => Self::EmailDelivered,
            "email.delivery_delayed" => Self::EmailDeliveryDelayed,
            "email.complained" => Self::EmailComplained,
            "email.bounced" => Self::EmailBounced,
            "email.opened" => Self::EmailOpened,
            "email.clicked" => Self::EmailClicked,
            "email.failed" => Self::EmailFailed,
            "email.scheduled" => Self::EmailScheduled,
            "email.received" => Self::EmailReceived,
            "contact.created" => Self::ContactCreated,
            "contact.updated" => Self::ContactUpdated,
            "contact.deleted" => Self::ContactDeleted,
            "domain.created" => Self::DomainCreated,
            "domain.updated" => Self::DomainUpdated,
            "domain.deleted" => Self::DomainDeleted,
            _ => Self::Other(s),
        }
    }
}

impl From<EmailEventType> for String {
    fn from(event_type: EmailEventType) -> Self {
        match event_type {
            EmailEventType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EmailEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
