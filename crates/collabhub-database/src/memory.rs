//! In-memory [`CollaboratorStore`] backed by `dashmap`.
//!
//! Mirrors the PostgreSQL semantics (unique grant key, skip-duplicate
//! inserts, owner rows immune to update and delete, binned resources hidden
//! from grant lookups). Used by tests and local development.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use collabhub_core::result::AppResult;
use collabhub_entity::file::File;
use collabhub_entity::folder::Folder;
use collabhub_entity::grant::{AccessType, Collaborator, Grant, NewGrant, ResourceKind};
use collabhub_entity::user::User;

use crate::store::{CollaboratorStore, GrantQuery};

type GrantKey = (ResourceKind, Uuid, Uuid);

#[derive(Debug, Default)]
struct Tables {
    users: DashMap<Uuid, User>,
    folders: DashMap<Uuid, Folder>,
    files: DashMap<Uuid, File>,
    grants: DashMap<GrantKey, Grant>,
    writes: AtomicU64,
}

/// Shared, cloneable in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an active user.
    pub fn add_user(&self, email: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            display_name: None,
            is_active: true,
            created_at: Utc::now(),
        };
        self.tables.users.insert(user.id, user.clone());
        user
    }

    /// Mark a user inactive.
    pub fn deactivate_user(&self, id: Uuid) {
        if let Some(mut user) = self.tables.users.get_mut(&id) {
            user.is_active = false;
        }
    }

    /// Create a folder together with its owner grant.
    pub fn add_folder(&self, owner_id: Uuid, name: &str) -> Uuid {
        let folder = Folder {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id,
            in_bin: false,
            created_at: Utc::now(),
        };
        let id = folder.id;
        self.tables.folders.insert(id, folder);
        self.put_grant(ResourceKind::Folder, id, owner_id, AccessType::Owner);
        id
    }

    /// Create a file together with its owner grant.
    pub fn add_file(&self, owner_id: Uuid, folder_id: Option<Uuid>, name: &str) -> Uuid {
        let file = File {
            id: Uuid::new_v4(),
            folder_id,
            name: name.to_string(),
            owner_id,
            in_bin: false,
            created_at: Utc::now(),
        };
        let id = file.id;
        self.tables.files.insert(id, file);
        self.put_grant(ResourceKind::File, id, owner_id, AccessType::Owner);
        id
    }

    /// Move a resource to the bin.
    pub fn move_to_bin(&self, kind: ResourceKind, id: Uuid) {
        match kind {
            ResourceKind::Folder => {
                if let Some(mut folder) = self.tables.folders.get_mut(&id) {
                    folder.in_bin = true;
                }
            }
            ResourceKind::File => {
                if let Some(mut file) = self.tables.files.get_mut(&id) {
                    file.in_bin = true;
                }
            }
        }
    }

    /// Seed or overwrite a grant. Not counted as a write.
    pub fn put_grant(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
        user_id: Uuid,
        access_type: AccessType,
    ) {
        let now = Utc::now();
        self.tables.grants.insert(
            (kind, resource_id, user_id),
            Grant {
                resource_id,
                user_id,
                access_type,
                created_at: now,
                updated_at: now,
            },
        );
    }

    /// Look up a single grant.
    pub fn grant(&self, kind: ResourceKind, resource_id: Uuid, user_id: Uuid) -> Option<Grant> {
        self.tables
            .grants
            .get(&(kind, resource_id, user_id))
            .map(|g| g.clone())
    }

    /// Number of grants of one kind on one resource.
    pub fn grant_count(&self, kind: ResourceKind, resource_id: Uuid) -> usize {
        self.tables
            .grants
            .iter()
            .filter(|e| e.key().0 == kind && e.key().1 == resource_id)
            .count()
    }

    /// Number of write statements issued through the store contract.
    pub fn write_count(&self) -> u64 {
        self.tables.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.tables.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn is_live(&self, kind: ResourceKind, id: Uuid) -> bool {
        match kind {
            ResourceKind::Folder => self.tables.folders.get(&id).is_some_and(|f| !f.in_bin),
            ResourceKind::File => self.tables.files.get(&id).is_some_and(|f| !f.in_bin),
        }
    }
}

#[async_trait]
impl CollaboratorStore for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.users.get(&id).map(|u| u.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| u.clone()))
    }

    async fn find_grants(
        &self,
        kind: ResourceKind,
        query: &GrantQuery<'_>,
    ) -> AppResult<Vec<Grant>> {
        let mut seen = HashSet::new();
        let grants = query
            .resource_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter(|id| self.is_live(kind, **id))
            .filter_map(|id| self.grant(kind, *id, query.user_id))
            .filter(|g| query.exclude != Some(g.access_type))
            .collect();
        Ok(grants)
    }

    async fn create_grants(&self, kind: ResourceKind, grants: &[NewGrant]) -> AppResult<u64> {
        if grants.is_empty() {
            return Ok(0);
        }
        self.record_write();
        let now = Utc::now();
        let mut inserted = 0;
        for new in grants {
            if let Entry::Vacant(slot) = self.tables.grants.entry((kind, new.resource_id, new.user_id)) {
                slot.insert(Grant {
                    resource_id: new.resource_id,
                    user_id: new.user_id,
                    access_type: new.access_type,
                    created_at: now,
                    updated_at: now,
                });
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn update_access(
        &self,
        kind: ResourceKind,
        user_id: Uuid,
        resource_ids: &[Uuid],
        access_type: AccessType,
    ) -> AppResult<u64> {
        if resource_ids.is_empty() {
            return Ok(0);
        }
        self.record_write();
        let ids: HashSet<&Uuid> = resource_ids.iter().collect();
        let mut changed = 0;
        for id in ids {
            if let Some(mut grant) = self.tables.grants.get_mut(&(kind, *id, user_id)) {
                if grant.access_type.is_owner() || grant.access_type == access_type {
                    continue;
                }
                grant.access_type = access_type;
                grant.updated_at = Utc::now();
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn delete_grants(
        &self,
        kind: ResourceKind,
        user_id: Uuid,
        resource_ids: &[Uuid],
    ) -> AppResult<u64> {
        if resource_ids.is_empty() {
            return Ok(0);
        }
        self.record_write();
        let ids: HashSet<&Uuid> = resource_ids.iter().collect();
        let removed = ids
            .into_iter()
            .filter_map(|id| {
                self.tables
                    .grants
                    .remove_if(&(kind, *id, user_id), |_, g| !g.access_type.is_owner())
            })
            .count();
        Ok(removed as u64)
    }

    async fn list_collaborators(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
    ) -> AppResult<Vec<Collaborator>> {
        let mut rows: Vec<(Grant, String)> = self
            .tables
            .grants
            .iter()
            .filter(|e| e.key().0 == kind && e.key().1 == resource_id)
            .filter_map(|e| {
                let email = self.tables.users.get(&e.user_id)?.email.clone();
                Some((e.value().clone(), email))
            })
            .collect();
        rows.sort_by(|a, b| a.0.created_at.cmp(&b.0.created_at).then_with(|| a.1.cmp(&b.1)));
        Ok(rows
            .into_iter()
            .map(|(g, email)| Collaborator {
                user_id: g.user_id,
                email,
                access_type: g.access_type,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
