//! User lookups.

use sqlx::PgPool;
use uuid::Uuid;

use collabhub_core::error::{AppError, ErrorKind};
use collabhub_core::result::AppResult;
use collabhub_entity::user::User;

const USER_COLUMNS: &str = "id, email, display_name, is_active, created_at";

/// Read-only repository over the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by email", e))
    }
}
