use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::core::error::ApiError;

/// `Json<T>` whose rejections come back as `ApiError::InvalidParameter`
///
/// Covers a missing or wrong content type, malformed JSON, and fields that
/// are missing or of the wrong type.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                warn!(status = %rejection.status(), "Rejected request body");
                Err(ApiError::InvalidParameter(rejection.body_text()))
            }
        }
    }
}
