//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
///
/// Users are created and deactivated by the account subsystem; the
/// collaborator core only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address, unique case-insensitively.
    pub email: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if the user may receive or act on grants.
    pub fn can_collaborate(&self) -> bool {
        self.is_active
    }
}
