//! Invitation tokens: sealed [`InvitationPayload`]s with an age limit.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use collabhub_core::config::InvitationConfig;
use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_entity::invitation::InvitationPayload;

use super::codec::TokenCodec;

/// The only error message a caller ever sees for a bad invitation token.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Mints and opens invitation tokens.
#[derive(Debug, Clone)]
pub struct InvitationCodec {
    codec: TokenCodec,
    ttl: Option<Duration>,
}

impl InvitationCodec {
    /// Wrap `codec`, rejecting tokens older than `ttl`.
    pub fn new(codec: TokenCodec, ttl: Option<Duration>) -> Self {
        Self { codec, ttl }
    }

    /// Build from the invitation settings.
    pub fn from_config(config: &InvitationConfig) -> Self {
        Self::new(TokenCodec::new(&config.token_secret), config.token_ttl())
    }

    /// The underlying codec, shared with other sealed responses.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Seal a payload into a token string.
    pub fn mint(&self, payload: &InvitationPayload) -> AppResult<String> {
        self.codec.seal(payload)
    }

    /// Open a token, checking its age against `now`.
    pub fn open(&self, token: &str, now: DateTime<Utc>) -> AppResult<InvitationPayload> {
        let payload: InvitationPayload = self.codec.open(token).map_err(|e| {
            debug!(error = %e, "Rejected invitation token");
            AppError::validation(INVALID_TOKEN_MESSAGE)
        })?;

        if payload.is_expired(self.ttl, now) {
            debug!(issued_at = payload.issued_at, "Rejected expired invitation token");
            return Err(AppError::validation(INVALID_TOKEN_MESSAGE));
        }
        Ok(payload)
    }
}
