use crate::models::account::MessageResponse;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use tracing::debug;

pub async fn fallback_handler(uri: Uri) -> Response {
    debug!(path = %uri.path(), "No route matched");

    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse {
            message: "Invalid endpoint. Valid endpoints: /signup, /login, /user, /borrow, /health"
                .to_string(),
        }),
    )
        .into_response()
}
