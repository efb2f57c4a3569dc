use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::require_body;
use crate::error::AppError;
use crate::state::AppState;

const REQUIRED: &str = "sessionId and structure are required";

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncBody {
    pub session_id: Option<String>,
    #[serde(default)]
    pub structure: serde_json::Value,
}

/// POST /api/sync-structure: the Studio plugin reports its game tree.
pub async fn sync_structure(
    State(app): State<AppState>,
    body: Result<Json<SyncBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let body = require_body(body, REQUIRED)?;
    let Some(session_id) = body.session_id else {
        return Err(AppError::bad_request(REQUIRED));
    };

    app.orchestrator
        .sync_structure(&session_id, body.structure)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
