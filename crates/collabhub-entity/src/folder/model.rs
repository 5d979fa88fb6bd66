//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder that can be shared with collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// The user holding the `owner` grant.
    pub owner_id: Uuid,
    /// Whether the folder sits in the bin (soft-deleted).
    pub in_bin: bool,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}
