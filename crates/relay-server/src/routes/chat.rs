use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use relay_core::types::ChatOutcome;

use super::require_body;
use crate::error::AppError;
use crate::state::AppState;

const REQUIRED: &str = "sessionId and message are required";

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

/// POST /api/chat: run one chat exchange for a session.
pub async fn chat(
    State(app): State<AppState>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatOutcome>, AppError> {
    let body = require_body(body, REQUIRED)?;
    let (Some(session_id), Some(message)) = (body.session_id, body.message) else {
        return Err(AppError::bad_request(REQUIRED));
    };

    let outcome = app.orchestrator.chat(&session_id, &message).await?;
    Ok(Json(outcome))
}
