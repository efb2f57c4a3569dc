use serde_json::Value;

use crate::config::GatewayConfig;
use crate::generator::{GenerationRequest, PromptMessage};

/// Header preceding the session's game-structure snapshot in chat prompts.
pub const STRUCTURE_HEADER: &str = "Current game structure";
/// Header preceding caller-supplied context in one-shot prompts.
pub const CONTEXT_HEADER: &str = "Context provided";

const INSTRUCTIONS: &str = r#"You are a Roblox Lua code assistant. You must respond ONLY with valid JSON matching this exact schema:

{
  "action": "create" | "edit" | "delete",
  "targetService": string (e.g., "ServerScriptService", "ReplicatedStorage"),
  "scriptType": "Script" | "LocalScript" | "ModuleScript",
  "name": string (script name),
  "source": string (full Lua source code - required for create/edit),
  "reason": string (brief explanation)
}

CRITICAL RULES:
- Return ONLY the JSON object, no other text
- For "create" or "edit" actions, always include complete, working Lua source code in the "source" field
- For "delete" actions, omit the "source" field
- Be concise but complete in the "reason" field
- Ensure Lua code follows Roblox best practices
- Include proper error handling in generated code"#;

/// Render the system instruction: schema, rules, context, then the request.
pub fn system_prompt(header: &str, context: &Value, request: &str) -> String {
    format!("{INSTRUCTIONS}\n\n{header}: {context}\n\nUser request: {request}")
}

/// Build the `[system, user]` request sent to the generator.
pub fn build_request(
    gateway: &GatewayConfig,
    header: &str,
    context: &Value,
    request: &str,
) -> GenerationRequest {
    GenerationRequest {
        model: gateway.model.clone(),
        messages: vec![
            PromptMessage::system(system_prompt(header, context, request)),
            PromptMessage::user(request),
        ],
        temperature: Some(gateway.temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PromptRole;
    use serde_json::json;

    #[test]
    fn context_is_embedded_as_compact_json() {
        let ctx = json!({"Workspace": {"Part": "Part"}});
        let prompt = system_prompt(STRUCTURE_HEADER, &ctx, "add a door");
        assert!(prompt.starts_with("You are a Roblox Lua code assistant."));
        assert!(prompt.contains(r#"Current game structure: {"Workspace":{"Part":"Part"}}"#));
        assert!(prompt.ends_with("User request: add a door"));
    }

    #[test]
    fn request_carries_model_temperature_and_two_messages() {
        let gateway = GatewayConfig::default();
        let req = build_request(&gateway, CONTEXT_HEADER, &json!({}), "hi");
        assert_eq!(req.model, "google/gemini-2.5-flash");
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, PromptRole::System);
        assert!(req.messages[0].content.contains("Context provided: {}"));
        assert_eq!(req.messages[1], PromptMessage::user("hi"));
    }
}
