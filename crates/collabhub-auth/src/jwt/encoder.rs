//! JWT access token creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use collabhub_core::config::AuthConfig;
use collabhub_core::error::AppError;

use super::claims::Claims;

/// Creates signed HS256 access tokens.
///
/// Sign-in lives outside this service; the encoder exists for operators
/// and tests that need to mint a bearer token.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.jwt_access_ttl_minutes as i64,
        }
    }

    /// Generates an access token for the given user.
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.access_ttl_minutes);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, exp))
    }
}
