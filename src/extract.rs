use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor that surfaces malformed or incomplete bodies as the
/// 400 validation error instead of axum's plain-text rejection.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(match rejection {
                // Missing or mistyped fields, same wording as the field checks
                JsonRejection::JsonDataError(_) => "All fields are required".to_string(),
                other => other.body_text(),
            })),
        }
    }
}
