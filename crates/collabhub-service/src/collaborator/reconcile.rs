//! Permission diff engine.
//!
//! Converges a target user's grants on a set of folders and files to one
//! access level, on behalf of an inviter who must hold non-read access to
//! every resource in the set.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_database::store::{CollaboratorStore, GrantQuery};
use collabhub_entity::grant::{AccessType, Grant, NewGrant, ResourceKind};

use super::resources::ResourceSet;

/// Message of the authorization gate's Forbidden error.
pub const INSUFFICIENT_PERMISSIONS: &str = "insufficient permissions";

/// Writes needed to bring one resource kind to the desired level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantPlan {
    /// Resources the target has no non-owner grant on.
    pub create: Vec<Uuid>,
    /// Resources the target holds at a different level.
    pub update: Vec<Uuid>,
}

impl GrantPlan {
    /// True when nothing needs to be written.
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty()
    }
}

/// Classify `requested` against the target's `existing` grants.
///
/// Owner grants are ignored. If `existing` holds several grants for one
/// resource the last one wins.
pub fn plan(requested: &[Uuid], existing: &[Grant], desired: AccessType) -> GrantPlan {
    let current: HashMap<Uuid, AccessType> = existing
        .iter()
        .filter(|g| !g.access_type.is_owner())
        .map(|g| (g.resource_id, g.access_type))
        .collect();

    let mut plan = GrantPlan::default();
    for id in requested {
        match current.get(id) {
            None => plan.create.push(*id),
            Some(level) if *level != desired => plan.update.push(*id),
            Some(_) => {}
        }
    }
    plan
}

/// Row counts written by one reconcile call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Folder grants inserted.
    pub folders_created: u64,
    /// Folder grants whose level changed.
    pub folders_updated: u64,
    /// File grants inserted.
    pub files_created: u64,
    /// File grants whose level changed.
    pub files_updated: u64,
}

impl ReconcileOutcome {
    /// True when no row changed.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }

    fn record(&mut self, kind: ResourceKind, created: u64, updated: u64) {
        match kind {
            ResourceKind::Folder => {
                self.folders_created += created;
                self.folders_updated += updated;
            }
            ResourceKind::File => {
                self.files_created += created;
                self.files_updated += updated;
            }
        }
    }
}

/// Applies [`plan`] against the persistence store.
#[derive(Debug, Clone)]
pub struct PermissionReconciler {
    store: Arc<dyn CollaboratorStore>,
}

impl PermissionReconciler {
    /// Creates a new reconciler.
    pub fn new(store: Arc<dyn CollaboratorStore>) -> Self {
        Self { store }
    }

    /// Require `actor_id` to hold non-read access to every live resource in
    /// `resources`. Binned or unknown resources fail the check.
    pub async fn authorize(&self, actor_id: Uuid, resources: &ResourceSet) -> AppResult<()> {
        for (kind, ids) in resources.by_kind() {
            if ids.is_empty() {
                continue;
            }
            let qualifying = self
                .store
                .find_grants(kind, &GrantQuery::new(actor_id, ids).excluding(AccessType::Read))
                .await?;
            if qualifying.len() < ids.len() {
                debug!(
                    actor_id = %actor_id,
                    kind = %kind,
                    requested = ids.len(),
                    qualifying = qualifying.len(),
                    "Authorization gate rejected request"
                );
                return Err(AppError::forbidden(INSUFFICIENT_PERMISSIONS));
            }
        }
        Ok(())
    }

    /// Bring `target_id`'s grants on `resources` to `desired`.
    ///
    /// Nothing is written when the inviter fails [`authorize`](Self::authorize).
    /// Repeating a successful call writes nothing.
    pub async fn reconcile(
        &self,
        inviter_id: Uuid,
        target_id: Uuid,
        resources: &ResourceSet,
        desired: AccessType,
    ) -> AppResult<ReconcileOutcome> {
        if desired.is_owner() {
            return Err(AppError::conflict("owner access can't be granted"));
        }

        self.authorize(inviter_id, resources).await?;

        let mut plans = Vec::with_capacity(2);
        for (kind, ids) in resources.by_kind() {
            if ids.is_empty() {
                continue;
            }
            let existing = self
                .store
                .find_grants(kind, &GrantQuery::new(target_id, ids).excluding(AccessType::Owner))
                .await?;
            plans.push((kind, plan(ids, &existing, desired)));
        }

        let mut outcome = ReconcileOutcome::default();
        for (kind, plan) in &plans {
            if plan.create.is_empty() {
                continue;
            }
            let grants: Vec<NewGrant> = plan
                .create
                .iter()
                .map(|resource_id| NewGrant {
                    resource_id: *resource_id,
                    user_id: target_id,
                    access_type: desired,
                })
                .collect();
            let created = self.store.create_grants(*kind, &grants).await?;
            outcome.record(*kind, created, 0);
        }
        for (kind, plan) in &plans {
            if plan.update.is_empty() {
                continue;
            }
            let updated = self
                .store
                .update_access(*kind, target_id, &plan.update, desired)
                .await?;
            outcome.record(*kind, 0, updated);
        }

        if !outcome.is_noop() {
            info!(
                inviter_id = %inviter_id,
                target_id = %target_id,
                access_type = %desired,
                folders_created = outcome.folders_created,
                folders_updated = outcome.folders_updated,
                files_created = outcome.files_created,
                files_updated = outcome.files_updated,
                "Grants reconciled"
            );
        }
        Ok(outcome)
    }
}
