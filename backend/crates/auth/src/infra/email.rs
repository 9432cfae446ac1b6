//! Notifier Implementations
//!
//! No real mail transport here; deployments plug in their own behind
//! the `Notifier` trait. `LogNotifier` writes messages to the log
//! (development), `MockNotifier` captures them for tests.

use std::sync::{Arc, Mutex, atomic::AtomicBool, atomic::Ordering};

use crate::domain::notifier::{Notifier, NotifyError};
use crate::domain::value_object::email::Email;

/// Notifier that logs messages instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), NotifyError> {
        tracing::info!(to = %to, subject = %subject, body = %body, "Outbound notification");
        Ok(())
    }
}

/// A message captured by [`MockNotifier`]
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub to: Email,
    pub subject: String,
    pub body: String,
}

/// Notifier that records messages for inspection in tests
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    fail: Arc<AtomicBool>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with a delivery error
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// All messages sent so far
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// The most recent message, if any
    pub fn last(&self) -> Option<SentMessage> {
        self.sent.lock().ok().and_then(|s| s.last().cloned())
    }
}

impl Notifier for MockNotifier {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Delivery("mock delivery failure".to_string()));
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentMessage {
                to: to.clone(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }

        Ok(())
    }
}
