//! Grant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::access::AccessType;

/// Kind of resource a grant points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A folder resource (`user_folders`).
    Folder,
    /// A file resource (`user_files`).
    File,
}

impl ResourceKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One user's access to one folder or file.
///
/// There is exactly one grant per (resource, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Grant {
    /// The folder or file id.
    pub resource_id: Uuid,
    /// The user holding the grant.
    pub user_id: Uuid,
    /// The access level.
    pub access_type: AccessType,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
    /// When the access level last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGrant {
    /// The folder or file id.
    pub resource_id: Uuid,
    /// The user receiving access.
    pub user_id: Uuid,
    /// The access level.
    pub access_type: AccessType,
}

/// A grant joined with the holder's email, for listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    /// The user holding the grant.
    pub user_id: Uuid,
    /// The user's email.
    pub email: String,
    /// The access level.
    pub access_type: AccessType,
}
