//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_entity::grant::{AccessType, ResourceKind};
use collabhub_service::ResourceSet;

use crate::extractors::path::parse_uuid;

/// Parse a required `accessType` field. Missing and null are rejected alike.
pub fn required_access_type(value: Option<&str>) -> AppResult<AccessType> {
    value
        .ok_or_else(|| AppError::validation("accessType is required"))?
        .parse()
}

fn resource_set(folders: &Option<Vec<Uuid>>, files: &Option<Vec<Uuid>>) -> ResourceSet {
    ResourceSet::new(
        folders.iter().flatten().copied(),
        files.iter().flatten().copied(),
    )
}

/// Direct invitation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCollaboratorRequest {
    /// Invitee address.
    #[validate(email(message = "collaboratorEmail must be a valid email address"))]
    pub collaborator_email: String,
    /// Level to grant.
    pub access_type: Option<String>,
    /// Folder ids to share.
    pub folders_id: Option<Vec<Uuid>>,
    /// File ids to share.
    pub files_id: Option<Vec<Uuid>>,
    /// Personal note for the email body.
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

impl AddCollaboratorRequest {
    /// Requested folders and files.
    pub fn resources(&self) -> ResourceSet {
        resource_set(&self.folders_id, &self.files_id)
    }
}

/// Public invitation link request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublicInvitationRequest {
    /// Folder ids to share.
    pub folders_id: Option<Vec<Uuid>>,
    /// File ids to share.
    pub files_id: Option<Vec<Uuid>>,
    /// Level to grant.
    pub access_type: Option<String>,
}

impl PublicInvitationRequest {
    /// Requested folders and files.
    pub fn resources(&self) -> ResourceSet {
        resource_set(&self.folders_id, &self.files_id)
    }
}

/// Collaborator removal request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCollaboratorRequest {
    /// User whose grants are removed.
    pub collaborator_id: Uuid,
    /// Folder ids.
    pub folders_id: Option<Vec<Uuid>>,
    /// File ids.
    pub files_id: Option<Vec<Uuid>>,
}

impl DeleteCollaboratorRequest {
    /// Targeted folders and files.
    pub fn resources(&self) -> ResourceSet {
        resource_set(&self.folders_id, &self.files_id)
    }
}

/// Access level change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollaboratorRequest {
    /// User whose grants change.
    pub collaborator_id: Uuid,
    /// New level.
    pub access_type: Option<String>,
    /// Folder ids.
    pub folders_id: Option<Vec<Uuid>>,
    /// File ids.
    pub files_id: Option<Vec<Uuid>>,
}

impl UpdateCollaboratorRequest {
    /// Targeted folders and files.
    pub fn resources(&self) -> ResourceSet {
        resource_set(&self.folders_id, &self.files_id)
    }
}

/// `?token=` on the redemption link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvitationQuery {
    pub token: Option<String>,
}

/// `?folderId=` or `?fileId=` for listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCollaboratorsQuery {
    pub folder_id: Option<String>,
    pub file_id: Option<String>,
}

impl ListCollaboratorsQuery {
    /// The single resource named by the query.
    pub fn target(&self) -> AppResult<(ResourceKind, Uuid)> {
        match (self.folder_id.as_deref(), self.file_id.as_deref()) {
            (Some(id), None) => Ok((ResourceKind::Folder, parse_uuid(id)?)),
            (None, Some(id)) => Ok((ResourceKind::File, parse_uuid(id)?)),
            _ => Err(AppError::validation(
                "Exactly one of folderId or fileId is required",
            )),
        }
    }
}
