//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Which mail transport to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Write messages to the log instead of sending them.
    Log,
    /// Relay through an SMTP server.
    Smtp,
}

/// SMTP relay and sender identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Transport to use.
    #[serde(default = "default_provider")]
    pub provider: MailProvider,
    /// SMTP host.
    #[serde(default = "default_host")]
    pub host: String,
    /// SMTP port. Port 465 uses implicit TLS, anything else STARTTLS.
    #[serde(default = "default_port")]
    pub port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Whether to use TLS at all.
    #[serde(default = "default_true")]
    pub use_tls: bool,
    /// Sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Sender display name.
    #[serde(default)]
    pub from_name: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            use_tls: default_true(),
            from_address: default_from_address(),
            from_name: None,
        }
    }
}

fn default_provider() -> MailProvider {
    MailProvider::Log
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_from_address() -> String {
    "no-reply@localhost".to_string()
}
