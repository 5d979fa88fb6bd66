//! PostgreSQL repositories and the [`PgStore`] that exposes them through
//! [`CollaboratorStore`].

pub mod grant;
pub mod user;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use collabhub_core::result::AppResult;
use collabhub_entity::grant::{AccessType, Collaborator, Grant, NewGrant, ResourceKind};
use collabhub_entity::user::User;

pub use grant::GrantRepository;
pub use user::UserRepository;

use crate::connection::DatabasePool;
use crate::store::{CollaboratorStore, GrantQuery};

/// [`CollaboratorStore`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: DatabasePool,
    users: UserRepository,
    grants: GrantRepository,
}

impl PgStore {
    /// Build the store over an open pool.
    pub fn new(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: UserRepository::new(pool.clone()),
            grants: GrantRepository::new(pool),
            db,
        }
    }
}

#[async_trait]
impl CollaboratorStore for PgStore {
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    async fn find_grants(
        &self,
        kind: ResourceKind,
        query: &GrantQuery<'_>,
    ) -> AppResult<Vec<Grant>> {
        self.grants.find(kind, query).await
    }

    async fn create_grants(&self, kind: ResourceKind, grants: &[NewGrant]) -> AppResult<u64> {
        self.grants.create_many(kind, grants).await
    }

    async fn update_access(
        &self,
        kind: ResourceKind,
        user_id: Uuid,
        resource_ids: &[Uuid],
        access_type: AccessType,
    ) -> AppResult<u64> {
        self.grants
            .update_access(kind, user_id, resource_ids, access_type)
            .await
    }

    async fn delete_grants(
        &self,
        kind: ResourceKind,
        user_id: Uuid,
        resource_ids: &[Uuid],
    ) -> AppResult<u64> {
        self.grants.delete_many(kind, user_id, resource_ids).await
    }

    async fn list_collaborators(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
    ) -> AppResult<Vec<Collaborator>> {
        self.grants.list_for_resource(kind, resource_id).await
    }

    async fn health_check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.db.pool()).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}
