//! Invitation payload carried inside an encrypted token.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grant::AccessType;

/// The decision an invitation token encodes.
///
/// Never persisted. It only exists sealed inside the token string between
/// minting and redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationPayload {
    /// Folders being shared.
    pub folders_id: Vec<Uuid>,
    /// Files being shared.
    pub files_id: Vec<Uuid>,
    /// Access level to grant.
    pub access_type: AccessType,
    /// Email of the inviting user.
    pub sender_email: String,
    /// Email of the invited user. `None` for public links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    /// Unix timestamp (seconds) of minting.
    pub issued_at: i64,
}

impl InvitationPayload {
    /// Whether this payload came from a public link rather than a direct invite.
    pub fn is_public(&self) -> bool {
        self.recipient_email.is_none()
    }

    /// Whether the payload is older than `ttl` at `now`.
    ///
    /// Timestamps from the future are treated as expired.
    pub fn is_expired(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        let Some(ttl) = ttl else {
            return false;
        };
        let age = now.timestamp() - self.issued_at;
        age < 0 || age as u64 > ttl.as_secs()
    }
}
