//! Unified application error types for CollabHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The HTTP layer maps each
//! [`ErrorKind`] to a status code exactly once.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed (missing or malformed input).
    Validation,
    /// The caller is not authenticated.
    Unauthorized,
    /// The caller does not have permission to perform the action.
    Forbidden,
    /// The requested resource was not found.
    NotFound,
    /// A conflict occurred (owner-touch attempt, duplicate grant).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// Encryption or decryption failed.
    Crypto,
    /// An external service (mail relay) failed.
    ExternalService,
}

impl ErrorKind {
    /// Whether this kind is meant to be shown to API callers as-is.
    ///
    /// Everything else is collapsed into [`ErrorKind::Internal`] before it
    /// leaves a service operation.
    pub fn is_client_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation | Self::Unauthorized | Self::Forbidden | Self::NotFound | Self::Conflict
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Crypto => write!(f, "CRYPTO"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
        }
    }
}

/// The unified application error used throughout CollabHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a crypto error.
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Crypto, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Keep client-facing errors, collapse everything else into an
    /// [`ErrorKind::Internal`] error carrying `message`.
    ///
    /// The original error is kept as the `source` so it still shows up in
    /// logs, but its text never reaches the caller.
    pub fn or_internal(self, message: impl Into<String>) -> Self {
        if self.kind.is_client_facing() {
            return self;
        }
        Self {
            kind: ErrorKind::Internal,
            message: message.into(),
            source: Some(Box::new(self)),
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_internal_keeps_client_facing_kinds() {
        let err = AppError::forbidden("insufficient permissions").or_internal("Failed to share");
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.message, "insufficient permissions");
    }

    #[test]
    fn test_or_internal_collapses_infrastructure_kinds() {
        let err = AppError::database("connection reset").or_internal("Failed to share");
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Failed to share");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::conflict("owner can't be removed");
        assert_eq!(err.to_string(), "CONFLICT: owner can't be removed");
    }
}
