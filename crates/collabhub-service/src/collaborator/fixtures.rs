//! Service wiring over the in-memory store for unit tests.

use std::sync::Arc;

use uuid::Uuid;

use collabhub_auth::token::InvitationCodec;
use collabhub_core::config::InvitationConfig;
use collabhub_database::MemoryStore;
use collabhub_entity::grant::AccessType;
use collabhub_entity::user::User;
use collabhub_mail::OutboxMailer;

use super::invitation::{CreateInvitation, InvitationService};
use super::reconcile::PermissionReconciler;
use super::resources::ResourceSet;
use super::service::CollaboratorService;
use crate::context::RequestContext;

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub outbox: OutboxMailer,
    pub reconciler: Arc<PermissionReconciler>,
    pub invitations: InvitationService,
    pub collaborators: CollaboratorService,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let outbox = OutboxMailer::new();
        let config = InvitationConfig {
            token_secret: "unit-test-secret".to_string(),
            base_url: "https://app.test/folder-invitation".to_string(),
            ..InvitationConfig::default()
        };
        let codec = InvitationCodec::from_config(&config);
        let shared: Arc<dyn collabhub_database::CollaboratorStore> = Arc::new(store.clone());
        let reconciler = Arc::new(PermissionReconciler::new(shared.clone()));

        Self {
            invitations: InvitationService::new(
                shared.clone(),
                reconciler.clone(),
                codec,
                Arc::new(outbox.clone()),
                config,
            ),
            collaborators: CollaboratorService::new(shared, reconciler.clone()),
            reconciler,
            store,
            outbox,
        }
    }

    pub fn user(&self, email: &str) -> User {
        self.store.add_user(email)
    }

    pub fn ctx(&self, user: &User) -> RequestContext {
        RequestContext::new(user.id, user.email.clone())
    }

    /// Send a direct invitation and pull the token out of the emailed link.
    pub async fn mint_direct(
        &self,
        sender: &User,
        recipient_email: &str,
        folders: &[Uuid],
        access_type: AccessType,
    ) -> String {
        self.invitations
            .create_invitation(
                &self.ctx(sender),
                CreateInvitation {
                    collaborator_email: Some(recipient_email.to_string()),
                    resources: ResourceSet::new(folders.iter().copied(), []),
                    access_type,
                    message: None,
                },
            )
            .await
            .unwrap();

        let sent = self.outbox.sent();
        let html = &sent.last().unwrap().html;
        let start = html.find("token=").unwrap() + "token=".len();
        html[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect()
    }
}

