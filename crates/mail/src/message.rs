//! Outgoing message and delivery receipt.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Plain-text alternative part.
    pub text: String,
}

/// What a transport reports back after accepting a message.
///
/// Returned to callers of the email functions as `details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryReceipt {
    /// Provider message id, or a locally generated one when the provider
    /// does not return any.
    pub id: String,
    pub transport: &'static str,
    pub to: String,
    pub sent_at: DateTime<Utc>,
}

impl DeliveryReceipt {
    pub fn new(id: Option<String>, transport: &'static str, to: &str) -> Self {
        Self {
            id: id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            transport,
            to: to.to_string(),
            sent_at: Utc::now(),
        }
    }
}
