use relay_core::generator::{GenerationRequest, PromptMessage, PromptRole};
use serde::{Deserialize, Serialize};

// ─── Request ──────────────────────────────────────────────────────────────

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl From<&PromptMessage> for WireMessage {
    fn from(msg: &PromptMessage) -> Self {
        let role = match msg.role {
            PromptRole::System => "system",
            PromptRole::User => "user",
            PromptRole::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: msg.content.clone(),
        }
    }
}

impl From<&GenerationRequest> for ChatCompletionRequest {
    fn from(req: &GenerationRequest) -> Self {
        Self {
            model: req.model.clone(),
            messages: req.messages.iter().map(WireMessage::from).collect(),
            temperature: req.temperature,
        }
    }
}

// ─── Response ─────────────────────────────────────────────────────────────

/// Only the fields we read; providers attach plenty more.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Content of the first choice, if it is present and non-empty.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|s| !s.is_empty())
    }
}
