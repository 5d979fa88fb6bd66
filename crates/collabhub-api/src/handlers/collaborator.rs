//! Collaborator sharing handlers.

use axum::Json;
use axum::extract::{Query, State};

use collabhub_auth::token::INVALID_TOKEN_MESSAGE;
use collabhub_core::error::AppError;
use collabhub_service::{CreateInvitation, InvitationDelivery};

use crate::dto::request::{
    AddCollaboratorRequest, DeleteCollaboratorRequest, InvitationQuery, ListCollaboratorsQuery,
    PublicInvitationRequest, UpdateCollaboratorRequest, required_access_type,
};
use crate::dto::response::{
    CollaboratorsResponse, DeleteCollaboratorBody, EncryptedEnvelope, InvitationAcceptedResponse,
    InvitationLinkResponse, MessageResponse, UpdateCollaboratorResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, OptionalAuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/collaborators/add-folder-collaborator
pub async fn add_folder_collaborator(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<AddCollaboratorRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let access_type = required_access_type(req.access_type.as_deref())?;
    let resources = req.resources();

    state
        .invitation_service
        .create_invitation(
            &auth,
            CreateInvitation {
                collaborator_email: Some(req.collaborator_email),
                resources,
                access_type,
                message: req.message,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Invitation sent")))
}

/// GET /api/collaborators/folder-invitation?token=
pub async fn folder_invitation(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    Query(query): Query<InvitationQuery>,
) -> Result<Json<InvitationAcceptedResponse>, ApiError> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation(INVALID_TOKEN_MESSAGE))?;

    let redeemed = state
        .invitation_service
        .redeem_invitation(&token, caller.map(|ctx| ctx.user_id))
        .await?;

    Ok(Json(InvitationAcceptedResponse {
        message: "Invitation accepted".to_string(),
        folders_id: redeemed.folders_id,
        files_id: redeemed.files_id,
        access_type: redeemed.access_type,
        user: redeemed.user,
    }))
}

/// POST /api/collaborators/generate-public-invitation
pub async fn generate_public_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<PublicInvitationRequest>,
) -> Result<Json<InvitationLinkResponse>, ApiError> {
    let access_type = required_access_type(req.access_type.as_deref())?;

    let delivery = state
        .invitation_service
        .create_invitation(
            &auth,
            CreateInvitation {
                collaborator_email: None,
                resources: req.resources(),
                access_type,
                message: None,
            },
        )
        .await?;

    match delivery {
        InvitationDelivery::Link(invitation_link) => {
            Ok(Json(InvitationLinkResponse { invitation_link }))
        }
        InvitationDelivery::Emailed { .. } => {
            Err(AppError::internal("Failed to create invitation").into())
        }
    }
}

/// POST /api/collaborators/delete-collaborator
///
/// The response body is sealed; only holders of the invitation secret can
/// read which ids were removed.
pub async fn delete_collaborator(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<DeleteCollaboratorRequest>,
) -> Result<Json<EncryptedEnvelope>, ApiError> {
    let deleted = state
        .collaborator_service
        .delete_collaborator(&auth, req.collaborator_id, &req.resources())
        .await?;

    let body = DeleteCollaboratorBody {
        message: "Collaborator removed".to_string(),
        delete_folders_id: deleted.folders_id,
        delete_files_id: deleted.files_id,
    };
    let payload = state
        .codec
        .seal(&body)
        .map_err(|e| e.or_internal("Failed to delete collaborator"))?;

    Ok(Json(EncryptedEnvelope { payload }))
}

/// POST /api/collaborators/update-collaborator
pub async fn update_collaborator(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<UpdateCollaboratorRequest>,
) -> Result<Json<UpdateCollaboratorResponse>, ApiError> {
    let access_type = required_access_type(req.access_type.as_deref())?;

    let updated = state
        .collaborator_service
        .update_collaborator(&auth, req.collaborator_id, &req.resources(), access_type)
        .await?;

    Ok(Json(UpdateCollaboratorResponse {
        message: "Collaborator updated".to_string(),
        folders_id: updated.folders_id,
        files_id: updated.files_id,
        access_type: updated.access_type,
    }))
}

/// GET /api/collaborators/list?folderId=|fileId=
pub async fn list_collaborators(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListCollaboratorsQuery>,
) -> Result<Json<CollaboratorsResponse>, ApiError> {
    let (kind, resource_id) = query.target()?;

    let collaborators = state
        .collaborator_service
        .list_collaborators(&auth, kind, resource_id)
        .await?;

    Ok(Json(CollaboratorsResponse { collaborators }))
}
