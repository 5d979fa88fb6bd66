//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file that can be shared with collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The folder containing this file, if any.
    pub folder_id: Option<Uuid>,
    /// The file name (including extension).
    pub name: String,
    /// The user holding the `owner` grant.
    pub owner_id: Uuid,
    /// Whether the file sits in the bin (soft-deleted).
    pub in_bin: bool,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
}
