//! The `Action` record handed to the Studio plugin.
//!
//! An `Action` is only ever produced by [`crate::validate`]; its fields are
//! private so a validated value cannot be altered afterwards. Deserializing
//! goes through the same validator, so stored or received JSON that breaks
//! the schema is rejected rather than turned into a half-valid action.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::SchemaViolation;

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Edit,
    Delete,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [Self::Create, Self::Edit, Self::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Create and edit replace the script body, so they carry `source`.
    pub fn requires_source(self) -> bool {
        matches!(self, Self::Create | Self::Edit)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ScriptType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptType {
    Script,
    LocalScript,
    ModuleScript,
}

impl ScriptType {
    pub const ALL: [ScriptType; 3] = [Self::Script, Self::LocalScript, Self::ModuleScript];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Script => "Script",
            Self::LocalScript => "LocalScript",
            Self::ModuleScript => "ModuleScript",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct Action {
    action: ActionKind,
    target_service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    script_type: Option<ScriptType>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    reason: String,
}

impl TryFrom<Value> for Action {
    type Error = SchemaViolation;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        crate::validate::validate_value(&value)
    }
}

impl Action {
    /// Assemble an action from fields the validator has already checked.
    pub(crate) fn from_checked(
        action: ActionKind,
        target_service: String,
        script_type: Option<ScriptType>,
        name: String,
        source: Option<String>,
        reason: String,
    ) -> Self {
        debug_assert_eq!(action.requires_source(), source.is_some());
        Self {
            action,
            target_service,
            script_type,
            name,
            source,
            reason,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.action
    }

    pub fn target_service(&self) -> &str {
        &self.target_service
    }

    pub fn script_type(&self) -> Option<ScriptType> {
        self.script_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The assistant's chat reply for this action.
    pub fn summary(&self) -> String {
        format!(
            "I'll {} \"{}\" in {}. {}",
            self.action, self.name, self.target_service, self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaderstats() -> Action {
        Action::from_checked(
            ActionKind::Create,
            "ServerScriptService".into(),
            Some(ScriptType::Script),
            "Leaderstats".into(),
            Some("-- code".into()),
            "adds stats".into(),
        )
    }

    #[test]
    fn kind_parse_is_case_sensitive() {
        assert_eq!(ActionKind::parse("edit"), Some(ActionKind::Edit));
        assert_eq!(ActionKind::parse("Edit"), None);
        assert_eq!(ScriptType::parse("ModuleScript"), Some(ScriptType::ModuleScript));
        assert_eq!(ScriptType::parse("modulescript"), None);
    }

    #[test]
    fn summary_matches_chat_format() {
        assert_eq!(
            leaderstats().summary(),
            "I'll create \"Leaderstats\" in ServerScriptService. adds stats"
        );
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let delete = Action::from_checked(
            ActionKind::Delete,
            "ReplicatedStorage".into(),
            None,
            "OldScript".into(),
            None,
            String::new(),
        );
        let json = serde_json::to_value(&delete).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "delete",
                "targetService": "ReplicatedStorage",
                "name": "OldScript",
                "reason": ""
            })
        );

        let json = serde_json::to_value(leaderstats()).unwrap();
        assert_eq!(json["scriptType"], "Script");
        assert_eq!(json["source"], "-- code");
    }

    #[test]
    fn deserialize_accepts_serialized_action() {
        let json = serde_json::to_string(&leaderstats()).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, leaderstats());
    }

    #[test]
    fn deserialize_rejects_what_the_validator_rejects() {
        let blank = r#"{"action":"create","targetService":"","name":"","reason":""}"#;
        let err = serde_json::from_str::<Action>(blank).unwrap_err();
        assert!(err.to_string().contains("missing required field: name"));

        let no_source = r#"{"action":"edit","targetService":"Workspace","name":"Door"}"#;
        let err = serde_json::from_str::<Action>(no_source).unwrap_err();
        assert!(err.to_string().contains("missing required field: source"));
    }

    #[test]
    fn deserialize_drops_source_on_delete() {
        let json = r#"{"action":"delete","targetService":"Workspace","name":"Old","source":"x"}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action.source(), None);
        assert_eq!(action.reason(), "");
    }
}
