//! JWT access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use collabhub_core::config::AuthConfig;
use collabhub_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized("Invalid token"),
            })
    }
}
