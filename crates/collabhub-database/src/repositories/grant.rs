//! Grant repository over `user_folders` and `user_files`.

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use collabhub_core::error::{AppError, ErrorKind};
use collabhub_core::result::AppResult;
use collabhub_entity::grant::{AccessType, Collaborator, Grant, NewGrant, ResourceKind};

use crate::store::GrantQuery;

/// Table layout for one resource kind.
#[derive(Debug, Clone, Copy)]
struct GrantTable {
    grants: &'static str,
    column: &'static str,
    resources: &'static str,
}

fn table_for(kind: ResourceKind) -> GrantTable {
    match kind {
        ResourceKind::Folder => GrantTable {
            grants: "user_folders",
            column: "folder_id",
            resources: "folders",
        },
        ResourceKind::File => GrantTable {
            grants: "user_files",
            column: "file_id",
            resources: "files",
        },
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

/// Repository for grant queries and batch writes.
#[derive(Debug, Clone)]
pub struct GrantRepository {
    pool: PgPool,
}

impl GrantRepository {
    /// Create a new grant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grants of one user over a set of live resources.
    pub async fn find(&self, kind: ResourceKind, query: &GrantQuery<'_>) -> AppResult<Vec<Grant>> {
        if query.resource_ids.is_empty() {
            return Ok(Vec::new());
        }
        let t = table_for(kind);
        let sql = format!(
            "SELECT g.{col} AS resource_id, g.user_id, g.access_type, g.created_at, g.updated_at \
             FROM {grants} g JOIN {resources} r ON r.id = g.{col} \
             WHERE g.user_id = $1 AND g.{col} = ANY($2) AND r.in_bin = FALSE \
             AND ($3::text IS NULL OR g.access_type::text <> $3)",
            col = t.column,
            grants = t.grants,
            resources = t.resources,
        );
        sqlx::query_as::<_, Grant>(&sql)
            .bind(query.user_id)
            .bind(query.resource_ids)
            .bind(query.exclude.map(|a| a.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to find grants"))
    }

    /// Batch insert with `ON CONFLICT DO NOTHING`.
    pub async fn create_many(&self, kind: ResourceKind, grants: &[NewGrant]) -> AppResult<u64> {
        if grants.is_empty() {
            return Ok(0);
        }
        let t = table_for(kind);
        let resource_ids: Vec<Uuid> = grants.iter().map(|g| g.resource_id).collect();
        let user_ids: Vec<Uuid> = grants.iter().map(|g| g.user_id).collect();
        let levels: Vec<String> = grants.iter().map(|g| g.access_type.to_string()).collect();

        let sql = format!(
            "INSERT INTO {grants} ({col}, user_id, access_type) \
             SELECT r, u, a::access_type FROM UNNEST($1::uuid[], $2::uuid[], $3::text[]) AS t(r, u, a) \
             ON CONFLICT ({col}, user_id) DO NOTHING",
            grants = t.grants,
            col = t.column,
        );
        let result = sqlx::query(&sql)
            .bind(&resource_ids)
            .bind(&user_ids)
            .bind(&levels)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to create grants"))?;

        debug!(
            table = t.grants,
            requested = grants.len(),
            inserted = result.rows_affected(),
            "Grants created"
        );
        Ok(result.rows_affected())
    }

    /// Change the level of non-owner grants whose level differs.
    pub async fn update_access(
        &self,
        kind: ResourceKind,
        user_id: Uuid,
        resource_ids: &[Uuid],
        access_type: AccessType,
    ) -> AppResult<u64> {
        if resource_ids.is_empty() {
            return Ok(0);
        }
        let t = table_for(kind);
        let sql = format!(
            "UPDATE {grants} SET access_type = $1::access_type, updated_at = NOW() \
             WHERE user_id = $2 AND {col} = ANY($3) \
             AND access_type <> 'owner' AND access_type <> $1::access_type",
            grants = t.grants,
            col = t.column,
        );
        let result = sqlx::query(&sql)
            .bind(access_type.as_str())
            .bind(user_id)
            .bind(resource_ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update grants"))?;
        Ok(result.rows_affected())
    }

    /// Delete non-owner grants.
    pub async fn delete_many(
        &self,
        kind: ResourceKind,
        user_id: Uuid,
        resource_ids: &[Uuid],
    ) -> AppResult<u64> {
        if resource_ids.is_empty() {
            return Ok(0);
        }
        let t = table_for(kind);
        let sql = format!(
            "DELETE FROM {grants} WHERE user_id = $1 AND {col} = ANY($2) AND access_type <> 'owner'",
            grants = t.grants,
            col = t.column,
        );
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(resource_ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete grants"))?;
        Ok(result.rows_affected())
    }

    /// All grants on one resource with the holder's email, oldest first.
    pub async fn list_for_resource(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
    ) -> AppResult<Vec<Collaborator>> {
        let t = table_for(kind);
        let sql = format!(
            "SELECT g.user_id, u.email, g.access_type FROM {grants} g \
             JOIN users u ON u.id = g.user_id \
             WHERE g.{col} = $1 ORDER BY g.created_at ASC",
            grants = t.grants,
            col = t.column,
        );
        sqlx::query_as::<_, Collaborator>(&sql)
            .bind(resource_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list collaborators"))
    }
}
