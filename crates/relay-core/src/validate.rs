//! Validate a JSON candidate against the `Action` schema.
//!
//! Checks run in a fixed order and the first failure is returned:
//! parse, `action`, `name`, `targetService`, `scriptType`, `source`.
//! Nothing is repaired except `reason`, which defaults to an empty string.

use serde_json::Value;

use crate::action::{Action, ActionKind, ScriptType};
use crate::error::{RelayError, Result, SchemaViolation};
use crate::extract::extract_candidate;

/// Parse and validate an already-extracted candidate string.
pub fn validate_candidate(candidate: &str) -> Result<Action> {
    let value: Value =
        serde_json::from_str(candidate).map_err(|_| RelayError::MalformedJson {
            candidate: candidate.to_string(),
        })?;
    validate_value(&value).map_err(|violation| RelayError::Schema {
        violation,
        candidate: candidate.to_string(),
    })
}

/// Extract the embedded object from a raw assistant reply and validate it.
pub fn parse_action(reply: &str) -> Result<Action> {
    let candidate = extract_candidate(reply).map_err(|_| RelayError::MalformedJson {
        candidate: reply.to_string(),
    })?;
    validate_candidate(candidate)
}

/// Check a parsed JSON value. Unknown fields are ignored.
pub fn validate_value(value: &Value) -> std::result::Result<Action, SchemaViolation> {
    let kind = match value.get("action") {
        Some(Value::String(s)) => {
            ActionKind::parse(s).ok_or_else(|| SchemaViolation::InvalidAction(s.clone()))?
        }
        Some(other) => return Err(SchemaViolation::InvalidAction(other.to_string())),
        None => return Err(SchemaViolation::InvalidAction("missing".into())),
    };

    let name = required_str(value, "name")?;
    let target_service = required_str(value, "targetService")?;

    let script_type = match value.get("scriptType") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(
            ScriptType::parse(s).ok_or_else(|| SchemaViolation::InvalidScriptType(s.clone()))?,
        ),
        Some(other) => return Err(SchemaViolation::InvalidScriptType(other.to_string())),
    };

    let source = if kind.requires_source() {
        Some(required_str(value, "source")?)
    } else {
        None
    };

    let reason = value
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Action::from_checked(
        kind,
        target_service,
        script_type,
        name,
        source,
        reason,
    ))
}

fn required_str(value: &Value, field: &'static str) -> std::result::Result<String, SchemaViolation> {
    match value.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(SchemaViolation::MissingField(field)),
    }
}
