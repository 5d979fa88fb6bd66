//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use collabhub_auth::jwt::JwtDecoder;
use collabhub_auth::token::{InvitationCodec, TokenCodec};
use collabhub_core::config::AppConfig;
use collabhub_database::CollaboratorStore;
use collabhub_mail::Mailer;
use collabhub_service::{CollaboratorService, InvitationService, PermissionReconciler};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Persistence handle
    pub store: Arc<dyn CollaboratorStore>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Seals response bodies that leave the server encrypted
    pub codec: TokenCodec,
    /// Invitation minting and redemption
    pub invitation_service: Arc<InvitationService>,
    /// Collaborator removal, update and listing
    pub collaborator_service: Arc<CollaboratorService>,
}

impl AppState {
    /// Wire services over `store` and `mailer`.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CollaboratorStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let invitation_codec = InvitationCodec::from_config(&config.invitation);
        let codec = invitation_codec.codec().clone();
        let reconciler = Arc::new(PermissionReconciler::new(store.clone()));

        let invitation_service = Arc::new(InvitationService::new(
            store.clone(),
            reconciler.clone(),
            invitation_codec,
            mailer,
            config.invitation.clone(),
        ));
        let collaborator_service = Arc::new(CollaboratorService::new(store.clone(), reconciler));

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            store,
            codec,
            invitation_service,
            collaborator_service,
        }
    }
}
