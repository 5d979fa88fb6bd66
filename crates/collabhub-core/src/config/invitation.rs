//! Invitation token and link configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for minting and redeeming collaborator invitations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationConfig {
    /// Secret the symmetric token key is derived from.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Page that redeems invitations; the token is appended as `?token=`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum token age in hours. `0` disables the age check.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
    /// Subject line of invitation emails.
    #[serde(default = "default_subject")]
    pub email_subject: String,
}

impl InvitationConfig {
    /// Token lifetime, or `None` when tokens never expire.
    pub fn token_ttl(&self) -> Option<Duration> {
        (self.token_ttl_hours > 0).then(|| Duration::from_secs(self.token_ttl_hours * 3600))
    }
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            base_url: default_base_url(),
            token_ttl_hours: default_token_ttl_hours(),
            email_subject: default_subject(),
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000/folder-invitation".to_string()
}

fn default_token_ttl_hours() -> u64 {
    168
}

fn default_subject() -> String {
    "You have been invited to collaborate".to_string()
}
