//! Mailer that keeps messages in memory.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{MailError, Mailer};

/// A message captured by [`OutboxMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    /// Recipient.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Collects outgoing messages so they can be inspected later.
#[derive(Debug, Clone, Default)]
pub struct OutboxMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
}

impl OutboxMailer {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SentMail {
                to: to.to_string(),
                subject: subject.to_string(),
                html: html.to_string(),
            });
        Ok(())
    }
}
