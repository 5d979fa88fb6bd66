//! Bearer-token extractors. Pull the JWT from the Authorization header,
//! validate it, and inject a `RequestContext`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use collabhub_core::error::AppError;
use collabhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        Ok(AuthUser(authenticate(header, state)?))
    }
}

/// Caller identity when a bearer token is present and valid.
///
/// Used where anonymous callers are allowed. A missing, malformed or
/// expired token yields `None`.
#[derive(Debug, Clone, Default)]
pub struct OptionalAuthUser(pub Option<RequestContext>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
            return Ok(Self(None));
        };

        match authenticate(header, state) {
            Ok(ctx) => Ok(Self(Some(ctx))),
            Err(e) => {
                debug!(error = %e, "Ignoring unusable bearer token");
                Ok(Self(None))
            }
        }
    }
}

fn authenticate(header: &str, state: &AppState) -> Result<RequestContext, AppError> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

    let claims = state.jwt_decoder.decode(token)?;
    Ok(RequestContext::new(claims.user_id(), claims.email))
}
