use axum::extract::{Path, State};
use axum::Json;
use relay_core::types::{ChatTurn, PendingAction, Snapshot};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/sessions/{id}/messages: chat transcript, oldest first.
pub async fn list_messages(
    State(app): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ChatTurn>>, AppError> {
    let turns = app.orchestrator.chat_history(&session_id).await?;
    Ok(Json(turns))
}

/// GET /api/sessions/{id}/structure: latest game-structure snapshot.
pub async fn get_structure(
    State(app): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Snapshot>, AppError> {
    match app.orchestrator.snapshot(&session_id).await? {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Err(AppError::not_found(format!(
            "no structure synced for session '{session_id}'"
        ))),
    }
}

/// GET /api/sessions/{id}/pending-actions: actions awaiting the plugin.
pub async fn list_pending_actions(
    State(app): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<PendingAction>>, AppError> {
    let pending = app.orchestrator.pending_actions(&session_id).await?;
    Ok(Json(pending))
}
