pub mod chat;
pub mod events;
pub mod generate;
pub mod sessions;
pub mod structure;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Unwrap a JSON body, turning extractor rejections into a 400 envelope
/// carrying `msg`.
pub(crate) fn require_body<T>(
    body: Result<Json<T>, JsonRejection>,
    msg: &str,
) -> Result<T, AppError> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected request body");
            Err(AppError::bad_request(msg))
        }
    }
}
