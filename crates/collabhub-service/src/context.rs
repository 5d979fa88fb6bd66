//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built from the bearer token and passed into service methods so that
/// every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Email from the token claims.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            request_time: Utc::now(),
        }
    }
}
