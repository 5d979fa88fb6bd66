//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use collabhub_entity::grant::{AccessType, Collaborator};

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of redeeming an invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationAcceptedResponse {
    pub message: String,
    /// Folders the caller now holds.
    pub folders_id: Vec<Uuid>,
    /// Files the caller now holds.
    pub files_id: Vec<Uuid>,
    /// Level granted.
    pub access_type: AccessType,
    /// Email of the user who received the grants.
    pub user: String,
}

/// Freshly minted public link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationLinkResponse {
    pub invitation_link: String,
}

/// Body sealed with the token codec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    pub payload: String,
}

/// Plaintext of the delete-collaborator envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCollaboratorBody {
    pub message: String,
    /// Folder ids whose grant was removed.
    pub delete_folders_id: Vec<Uuid>,
    /// File ids whose grant was removed.
    pub delete_files_id: Vec<Uuid>,
}

/// Result of an access level change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollaboratorResponse {
    pub message: String,
    pub folders_id: Vec<Uuid>,
    pub files_id: Vec<Uuid>,
    pub access_type: AccessType,
}

/// Everyone holding a grant on one resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorsResponse {
    pub collaborators: Vec<Collaborator>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    /// Server version.
    pub version: String,
}
