//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use collabhub_core::error::AppError;

use crate::error::ApiError;

/// `Json<T>` whose rejections and validation failures surface as
/// validation errors.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        Ok(Self(value))
    }
}
