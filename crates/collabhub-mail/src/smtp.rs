//! SMTP transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use collabhub_core::config::MailConfig;

use crate::{MailError, Mailer};

/// Sends mail through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").field("from", &self.from).finish()
    }
}

impl SmtpMailer {
    /// Build the transport. Port 465 uses implicit TLS, other ports STARTTLS.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let host = config.host.as_str();
        let mut builder = if config.use_tls {
            let tls = TlsParameters::new(host.to_string())
                .map_err(|e| MailError::InvalidConfig(format!("TLS configuration error: {e}")))?;
            if config.port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| MailError::InvalidConfig(format!("SMTP relay error: {e}")))?
                    .port(config.port)
                    .tls(Tls::Wrapper(tls))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| MailError::InvalidConfig(format!("SMTP relay error: {e}")))?
                    .port(config.port)
                    .tls(Tls::Required(tls))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(config.port)
        };

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from = match &config.from_name {
            Some(name) => format!("{name} <{}>", config.from_address),
            None => config.from_address.clone(),
        };
        let from = parse_mailbox(&from)?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(to)?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| MailError::SendFailed(format!("Failed to build email: {e}")))?;

        self.transport.send(message).await.map_err(|e| {
            warn!(to = %to, error = %e, "SMTP delivery failed");
            MailError::SendFailed(e.to_string())
        })?;

        debug!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}
