//! Notifier Trait
//!
//! Outbound message delivery (e.g., email). Delivery can fail
//! transiently; callers log the failure and continue, because the user
//! can always request another message.

use thiserror::Error;

use crate::domain::value_object::email::Email;

/// Notification delivery error
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Delivery timed out")]
    Timeout,
}

/// Trait for outbound notification delivery
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    /// Deliver a message to an address
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), NotifyError>;
}
