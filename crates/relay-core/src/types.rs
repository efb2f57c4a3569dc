use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::action::Action;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChatTurn
// ---------------------------------------------------------------------------

/// One message of a conversation. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub id: Uuid,
    pub session_id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(session_id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.into(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// PendingAction
// ---------------------------------------------------------------------------

/// A validated action waiting for the Studio plugin to pick it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    pub id: Uuid,
    pub session_id: String,
    pub action: Action,
    pub created_at: DateTime<Utc>,
}

impl PendingAction {
    pub fn new(session_id: impl Into<String>, action: Action) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.into(),
            action,
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The latest game-structure tree reported by the plugin for a session.
///
/// `structure` is schema-less and only ever serialized back into prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub session_id: String,
    pub structure: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// StudioSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioSession {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_heartbeat: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// ChatOutcome
// ---------------------------------------------------------------------------

/// Result of one successful chat exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOutcome {
    pub message: String,
    pub action: Action,
}
