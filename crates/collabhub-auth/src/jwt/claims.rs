//! JWT claims carried by bearer tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Email at the time of issuance.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
