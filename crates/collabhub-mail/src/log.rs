//! Mailer that only logs.

use async_trait::async_trait;
use tracing::info;

use crate::{MailError, Mailer};

/// Writes each message to the log instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    /// Create a log mailer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        info!(to = %to, subject = %subject, bytes = html.len(), "Email not sent (log provider)");
        Ok(())
    }
}
