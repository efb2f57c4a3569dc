use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::error::{ProviderError, RelayError};

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 404 errors
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 404 through
/// the `anyhow::Error` chain without touching the `RelayError` enum.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Every response carries `{ "error": <short message>, "details"?: <diagnostics> }`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(RelayError::BadRequest(msg.into()).into())
    }

    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }
}

/// HTTP status for each error kind. Exhaustive so a new variant cannot slip
/// through as an accidental 500.
pub fn status_for(err: &RelayError) -> StatusCode {
    match err {
        RelayError::BadRequest(_) | RelayError::Schema { .. } => StatusCode::BAD_REQUEST,
        RelayError::Provider(p) => match p {
            ProviderError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ProviderError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            ProviderError::Empty | ProviderError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        RelayError::MalformedJson { .. }
        | RelayError::Config(_)
        | RelayError::Store(_)
        | RelayError::Io(_)
        | RelayError::Yaml(_)
        | RelayError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(n) = self.0.downcast_ref::<NotFoundError>() {
            let body = serde_json::json!({ "error": n.0.clone() });
            return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
        }

        let (status, details) = match self.0.downcast_ref::<RelayError>() {
            Some(e) => (status_for(e), e.details()),
            None => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let mut body = serde_json::json!({ "error": self.0.to_string() });
        if let Some(details) = details {
            body["details"] = serde_json::Value::String(details);
        }
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use relay_core::error::SchemaViolation;

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::bad_request("sessionId and message are required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn schema_violation_maps_to_400() {
        let err = AppError(
            RelayError::Schema {
                violation: SchemaViolation::MissingField("name"),
                candidate: "{}".into(),
            }
            .into(),
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rate_limit_maps_to_429() {
        let err = AppError(RelayError::from(ProviderError::RateLimited).into());
        assert_eq!(err.into_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn quota_maps_to_402() {
        let err = AppError(RelayError::from(ProviderError::QuotaExhausted).into());
        assert_eq!(err.into_response().status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn provider_failure_maps_to_500() {
        let err = AppError(RelayError::from(ProviderError::Failed("AI service error".into())).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let err = AppError(RelayError::from(ProviderError::Empty).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn malformed_json_maps_to_500() {
        let err = AppError(
            RelayError::MalformedJson {
                candidate: "nope".into(),
            }
            .into(),
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_error_maps_to_500() {
        let err = AppError(RelayError::Store("disk full".into()).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_relay_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_constructor_maps_to_404() {
        let response = AppError::not_found("no structure for session 's1'").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError::bad_request("x").into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
