//! # collabhub-mail
//!
//! Outbound email for invitations. Services talk to the [`Mailer`] trait;
//! the concrete transport is picked from [`MailConfig`] at startup.

pub mod log;
pub mod outbox;
pub mod smtp;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use collabhub_core::config::{MailConfig, MailProvider};
use collabhub_core::error::{AppError, ErrorKind};

pub use log::LogMailer;
pub use outbox::{OutboxMailer, SentMail};
pub use smtp::SmtpMailer;
pub use templates::InvitationEmail;

/// Mail delivery error.
#[derive(Debug, Error)]
pub enum MailError {
    /// The transport could not be built from configuration.
    #[error("Invalid mail configuration: {0}")]
    InvalidConfig(String),

    /// An address did not parse.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The offending address.
        address: String,
        /// Parser message.
        reason: String,
    },

    /// The relay refused or the connection failed.
    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::ExternalService, message, err)
    }
}

/// Delivers a single HTML message.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send `html` to `to` with the given subject.
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError>;
}

/// Build the transport selected by `config.provider`.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.provider {
        MailProvider::Log => Ok(Arc::new(LogMailer::new())),
        MailProvider::Smtp => Ok(Arc::new(SmtpMailer::new(config)?)),
    }
}
