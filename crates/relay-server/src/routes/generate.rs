use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use relay_core::Action;

use super::require_body;
use crate::error::AppError;
use crate::state::AppState;

const REQUIRED: &str = "prompt is required and must be a string";

#[derive(serde::Deserialize)]
pub struct GenerateBody {
    pub prompt: Option<String>,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// POST /api/generate: validate one generated action without persisting it.
pub async fn generate(
    State(app): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<Action>, AppError> {
    let body = require_body(body, REQUIRED)?;
    let Some(prompt) = body.prompt else {
        return Err(AppError::bad_request(REQUIRED));
    };

    let action = app
        .orchestrator
        .generate(&prompt, body.context.as_ref())
        .await?;
    Ok(Json(action))
}
