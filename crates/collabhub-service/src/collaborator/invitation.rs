//! Invitation orchestrator: mints capability tokens and redeems them.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use collabhub_auth::token::InvitationCodec;
use collabhub_core::config::InvitationConfig;
use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_database::store::CollaboratorStore;
use collabhub_entity::grant::AccessType;
use collabhub_entity::invitation::InvitationPayload;
use collabhub_entity::user::User;
use collabhub_mail::{InvitationEmail, Mailer};

use super::reconcile::{PermissionReconciler, ReconcileOutcome};
use super::resources::ResourceSet;
use crate::context::RequestContext;

/// Input for minting an invitation.
#[derive(Debug, Clone)]
pub struct CreateInvitation {
    /// Recipient of a direct invitation. `None` mints a public link.
    pub collaborator_email: Option<String>,
    /// Resources being shared.
    pub resources: ResourceSet,
    /// Level to grant on redemption.
    pub access_type: AccessType,
    /// Personal note for the email.
    pub message: Option<String>,
}

/// How a minted invitation reached its audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationDelivery {
    /// The link was emailed to this address.
    Emailed {
        /// Recipient address.
        recipient: String,
    },
    /// A public link for the caller to distribute.
    Link(String),
}

/// Summary of a redeemed invitation.
#[derive(Debug, Clone)]
pub struct RedeemedInvitation {
    /// Folders from the token.
    pub folders_id: Vec<Uuid>,
    /// Files from the token.
    pub files_id: Vec<Uuid>,
    /// Level granted.
    pub access_type: AccessType,
    /// Email of the user who received access.
    pub user: String,
    /// Rows written.
    pub outcome: ReconcileOutcome,
}

/// Mints and redeems invitation tokens.
#[derive(Debug, Clone)]
pub struct InvitationService {
    store: Arc<dyn CollaboratorStore>,
    reconciler: Arc<PermissionReconciler>,
    codec: InvitationCodec,
    mailer: Arc<dyn Mailer>,
    config: InvitationConfig,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(
        store: Arc<dyn CollaboratorStore>,
        reconciler: Arc<PermissionReconciler>,
        codec: InvitationCodec,
        mailer: Arc<dyn Mailer>,
        config: InvitationConfig,
    ) -> Self {
        Self {
            store,
            reconciler,
            codec,
            mailer,
            config,
        }
    }

    /// Mint an invitation token. Direct invitations are emailed, public ones
    /// are returned as a link. No grant is written.
    pub async fn create_invitation(
        &self,
        ctx: &RequestContext,
        req: CreateInvitation,
    ) -> AppResult<InvitationDelivery> {
        self.mint(ctx, req)
            .await
            .map_err(|e| e.or_internal("Failed to create invitation"))
    }

    async fn mint(
        &self,
        ctx: &RequestContext,
        req: CreateInvitation,
    ) -> AppResult<InvitationDelivery> {
        req.resources.require_any()?;
        if req.access_type.is_owner() {
            return Err(AppError::conflict("owner access can't be shared"));
        }

        let sender = self
            .store
            .find_user_by_id(ctx.user_id)
            .await?
            .filter(User::can_collaborate)
            .ok_or_else(|| AppError::not_found("Sender not found"))?;

        let recipient = match req.collaborator_email.as_deref() {
            Some(email) => Some(
                self.store
                    .find_user_by_email(email)
                    .await?
                    .filter(User::can_collaborate)
                    .ok_or_else(|| AppError::not_found("Collaborator not found"))?,
            ),
            None => None,
        };

        self.reconciler.authorize(sender.id, &req.resources).await?;

        let payload = InvitationPayload {
            folders_id: req.resources.folders().to_vec(),
            files_id: req.resources.files().to_vec(),
            access_type: req.access_type,
            sender_email: sender.email.clone(),
            recipient_email: recipient.as_ref().map(|u| u.email.clone()),
            issued_at: ctx.request_time.timestamp(),
        };
        let token = self.codec.mint(&payload)?;
        let link = invitation_link(&self.config.base_url, &token);

        let Some(recipient) = recipient else {
            info!(
                user_id = %ctx.user_id,
                folders = payload.folders_id.len(),
                files = payload.files_id.len(),
                access_type = %payload.access_type,
                "Public invitation link generated"
            );
            return Ok(InvitationDelivery::Link(link));
        };

        let email = InvitationEmail::new(
            &self.config.email_subject,
            &sender.email,
            req.access_type.as_str(),
            &link,
            req.message.as_deref(),
        );
        self.mailer
            .send_html(&recipient.email, &email.subject, &email.html)
            .await?;

        info!(
            user_id = %ctx.user_id,
            recipient_id = %recipient.id,
            folders = payload.folders_id.len(),
            files = payload.files_id.len(),
            access_type = %payload.access_type,
            "Invitation emailed"
        );
        Ok(InvitationDelivery::Emailed {
            recipient: recipient.email,
        })
    }

    /// Redeem a token, granting access against the inviter's current grants.
    ///
    /// `requesting_user` is only consulted for public links.
    pub async fn redeem_invitation(
        &self,
        token: &str,
        requesting_user: Option<Uuid>,
    ) -> AppResult<RedeemedInvitation> {
        self.redeem(token, requesting_user)
            .await
            .map_err(|e| e.or_internal("Failed to accept invitation"))
    }

    async fn redeem(
        &self,
        token: &str,
        requesting_user: Option<Uuid>,
    ) -> AppResult<RedeemedInvitation> {
        let payload = self.codec.open(token, Utc::now())?;

        let target = match payload.recipient_email.as_deref() {
            Some(email) => self
                .store
                .find_user_by_email(email)
                .await?
                .filter(User::can_collaborate)
                .ok_or_else(|| AppError::not_found("Invited user not found"))?,
            None => {
                let user_id = requesting_user
                    .ok_or_else(|| AppError::validation("Sign in to accept this invitation"))?;
                self.store
                    .find_user_by_id(user_id)
                    .await?
                    .filter(User::can_collaborate)
                    .ok_or_else(|| AppError::validation("Invalid user for this invitation"))?
            }
        };

        let sender = self
            .store
            .find_user_by_email(&payload.sender_email)
            .await?
            .filter(User::can_collaborate)
            .ok_or_else(|| AppError::not_found("Inviting user not found"))?;

        let resources = ResourceSet::new(
            payload.folders_id.iter().copied(),
            payload.files_id.iter().copied(),
        );
        let outcome = self
            .reconciler
            .reconcile(sender.id, target.id, &resources, payload.access_type)
            .await?;

        info!(
            sender_id = %sender.id,
            target_id = %target.id,
            public = payload.is_public(),
            access_type = %payload.access_type,
            "Invitation redeemed"
        );

        Ok(RedeemedInvitation {
            folders_id: payload.folders_id,
            files_id: payload.files_id,
            access_type: payload.access_type,
            user: target.email,
            outcome,
        })
    }
}

/// Append the token to the redemption page address.
fn invitation_link(base_url: &str, token: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}token={token}")
}
