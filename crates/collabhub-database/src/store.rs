//! The persistence contract of the collaborator core.
//!
//! Grants live in two tables with identical shape (`user_folders` and
//! `user_files`), so every grant operation takes a [`ResourceKind`] instead
//! of being duplicated per table.

use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use collabhub_core::result::AppResult;
use collabhub_entity::grant::{AccessType, Collaborator, Grant, NewGrant, ResourceKind};
use collabhub_entity::user::User;

/// Filter for [`CollaboratorStore::find_grants`].
#[derive(Debug, Clone, Copy)]
pub struct GrantQuery<'a> {
    /// Holder of the grants.
    pub user_id: Uuid,
    /// Resource ids to look at.
    pub resource_ids: &'a [Uuid],
    /// Skip grants carrying this access level.
    pub exclude: Option<AccessType>,
}

impl<'a> GrantQuery<'a> {
    /// Grants of `user_id` on `resource_ids`.
    pub fn new(user_id: Uuid, resource_ids: &'a [Uuid]) -> Self {
        Self {
            user_id,
            resource_ids,
            exclude: None,
        }
    }

    /// Skip grants with the given access level.
    pub fn excluding(mut self, access_type: AccessType) -> Self {
        self.exclude = Some(access_type);
        self
    }
}

/// Generic query interface over users and access grants.
///
/// Implementations must uphold:
/// - at most one grant per (resource, user);
/// - grants on binned resources are invisible to `find_grants`;
/// - `update_access` and `delete_grants` never touch `owner` rows.
#[async_trait]
pub trait CollaboratorStore: Send + Sync + Debug + 'static {
    /// Find a user by primary key.
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Grants matching `query` on live (non-binned) resources.
    async fn find_grants(
        &self,
        kind: ResourceKind,
        query: &GrantQuery<'_>,
    ) -> AppResult<Vec<Grant>>;

    /// Insert grants, silently skipping any (resource, user) pair that
    /// already exists. Returns the number of rows inserted.
    async fn create_grants(&self, kind: ResourceKind, grants: &[NewGrant]) -> AppResult<u64>;

    /// Set `access_type` on the non-owner grants of `user_id` over
    /// `resource_ids`. Returns the number of rows whose level changed.
    async fn update_access(
        &self,
        kind: ResourceKind,
        user_id: Uuid,
        resource_ids: &[Uuid],
        access_type: AccessType,
    ) -> AppResult<u64>;

    /// Remove the non-owner grants of `user_id` over `resource_ids`.
    /// Returns the number of rows removed.
    async fn delete_grants(
        &self,
        kind: ResourceKind,
        user_id: Uuid,
        resource_ids: &[Uuid],
    ) -> AppResult<u64>;

    /// Every grant on one resource, joined with the holder's email.
    async fn list_collaborators(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
    ) -> AppResult<Vec<Collaborator>>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> bool;
}
