//! Access level enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level carried by a grant.
///
/// Owner and Write holders may share onward; Read holders may not. Only
/// `Owner` is exclusive per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "access_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// The resource owner. Never granted, changed, or removed by sharing.
    Owner,
    /// Can edit the resource and share it onward.
    Write,
    /// Read-only access. Cannot share onward.
    Read,
}

impl AccessType {
    /// Check if this is the owner level.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Return the access level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Write => "write",
            Self::Read => "read",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessType {
    type Err = collabhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "write" => Ok(Self::Write),
            "read" => Ok(Self::Read),
            _ => Err(collabhub_core::AppError::validation(format!(
                "Invalid access type: '{s}'. Expected one of: owner, write, read"
            ))),
        }
    }
}
