//! Typed identifier helpers.

use uuid::Uuid;

use collabhub_core::error::AppError;

/// Parses a UUID from a path or query value.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid UUID: {s}")))
}
