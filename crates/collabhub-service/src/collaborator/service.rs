//! Direct management of an existing collaborator's grants.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_database::store::{CollaboratorStore, GrantQuery};
use collabhub_entity::grant::{AccessType, Collaborator, ResourceKind};

use super::reconcile::{INSUFFICIENT_PERMISSIONS, PermissionReconciler};
use super::resources::ResourceSet;
use crate::context::RequestContext;

/// Grants removed by [`CollaboratorService::delete_collaborator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedGrants {
    /// Folder ids whose grant was removed.
    pub folders_id: Vec<Uuid>,
    /// File ids whose grant was removed.
    pub files_id: Vec<Uuid>,
}

/// Result of [`CollaboratorService::update_collaborator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedGrants {
    /// Folder ids from the request.
    pub folders_id: Vec<Uuid>,
    /// File ids from the request.
    pub files_id: Vec<Uuid>,
    /// The new level.
    pub access_type: AccessType,
    /// Rows whose level changed.
    pub changed: u64,
}

/// Removes, re-levels and lists collaborators.
#[derive(Debug, Clone)]
pub struct CollaboratorService {
    store: Arc<dyn CollaboratorStore>,
    reconciler: Arc<PermissionReconciler>,
}

impl CollaboratorService {
    /// Creates a new collaborator service.
    pub fn new(store: Arc<dyn CollaboratorStore>, reconciler: Arc<PermissionReconciler>) -> Self {
        Self { store, reconciler }
    }

    /// Remove `collaborator_id`'s grants on `resources`.
    ///
    /// Fails with Conflict, deleting nothing, if any targeted grant is the
    /// owner grant.
    pub async fn delete_collaborator(
        &self,
        ctx: &RequestContext,
        collaborator_id: Uuid,
        resources: &ResourceSet,
    ) -> AppResult<DeletedGrants> {
        self.delete(ctx, collaborator_id, resources)
            .await
            .map_err(|e| e.or_internal("Failed to delete collaborator"))
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        collaborator_id: Uuid,
        resources: &ResourceSet,
    ) -> AppResult<DeletedGrants> {
        resources.require_any()?;
        self.require_user(collaborator_id).await?;
        self.reconciler.authorize(ctx.user_id, resources).await?;

        let mut targets = Vec::with_capacity(2);
        for (kind, ids) in resources.by_kind() {
            if ids.is_empty() {
                continue;
            }
            let grants = self
                .store
                .find_grants(kind, &GrantQuery::new(collaborator_id, ids))
                .await?;
            if grants.iter().any(|g| g.access_type.is_owner()) {
                return Err(AppError::conflict("owner can't be removed"));
            }
            let held: Vec<Uuid> = grants.into_iter().map(|g| g.resource_id).collect();
            targets.push((kind, held));
        }

        let mut deleted = DeletedGrants::default();
        for (kind, ids) in targets {
            if ids.is_empty() {
                continue;
            }
            self.store.delete_grants(kind, collaborator_id, &ids).await?;
            match kind {
                ResourceKind::Folder => deleted.folders_id = ids,
                ResourceKind::File => deleted.files_id = ids,
            }
        }

        info!(
            user_id = %ctx.user_id,
            collaborator_id = %collaborator_id,
            folders = deleted.folders_id.len(),
            files = deleted.files_id.len(),
            "Collaborator removed"
        );
        Ok(deleted)
    }

    /// Set `collaborator_id`'s existing non-owner grants on `resources` to
    /// `access_type`. Owner grants are left alone and no grant is created.
    pub async fn update_collaborator(
        &self,
        ctx: &RequestContext,
        collaborator_id: Uuid,
        resources: &ResourceSet,
        access_type: AccessType,
    ) -> AppResult<UpdatedGrants> {
        self.update(ctx, collaborator_id, resources, access_type)
            .await
            .map_err(|e| e.or_internal("Failed to update collaborator"))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        collaborator_id: Uuid,
        resources: &ResourceSet,
        access_type: AccessType,
    ) -> AppResult<UpdatedGrants> {
        resources.require_any()?;
        if access_type.is_owner() {
            return Err(AppError::conflict("can't be updated to owner"));
        }
        self.require_user(collaborator_id).await?;
        self.reconciler.authorize(ctx.user_id, resources).await?;

        let mut changed = 0;
        for (kind, ids) in resources.by_kind() {
            if ids.is_empty() {
                continue;
            }
            changed += self
                .store
                .update_access(kind, collaborator_id, ids, access_type)
                .await?;
        }

        info!(
            user_id = %ctx.user_id,
            collaborator_id = %collaborator_id,
            access_type = %access_type,
            changed,
            "Collaborator access updated"
        );
        Ok(UpdatedGrants {
            folders_id: resources.folders().to_vec(),
            files_id: resources.files().to_vec(),
            access_type,
            changed,
        })
    }

    /// Everyone with a grant on one resource. The actor must hold a grant
    /// on it too.
    pub async fn list_collaborators(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        resource_id: Uuid,
    ) -> AppResult<Vec<Collaborator>> {
        self.list(ctx, kind, resource_id)
            .await
            .map_err(|e| e.or_internal("Failed to list collaborators"))
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        resource_id: Uuid,
    ) -> AppResult<Vec<Collaborator>> {
        let own = self
            .store
            .find_grants(kind, &GrantQuery::new(ctx.user_id, &[resource_id]))
            .await?;
        if own.is_empty() {
            return Err(AppError::forbidden(INSUFFICIENT_PERMISSIONS));
        }
        self.store.list_collaborators(kind, resource_id).await
    }

    async fn require_user(&self, id: Uuid) -> AppResult<()> {
        match self.store.find_user_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Collaborator not found")),
        }
    }
}
