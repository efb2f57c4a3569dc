//! Turns one user utterance into one persisted exchange.
//!
//! Writes are cumulative, not transactional: the user turn is stored before
//! the generator is called, so a failed generation leaves a user message with
//! no assistant reply. The assistant turn and the pending action are only
//! written once the reply has passed validation.

pub mod prompt;

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::action::Action;
use crate::config::GatewayConfig;
use crate::error::{RelayError, Result};
use crate::events::{ChangeEvent, EventBus};
use crate::generator::{GenerationRequest, Generator};
use crate::store::Store;
use crate::types::{ChatOutcome, ChatTurn, PendingAction, Role, Snapshot};
use crate::validate::parse_action;

pub struct Orchestrator {
    store: Arc<dyn Store>,
    generator: Arc<dyn Generator>,
    gateway: GatewayConfig,
    events: EventBus,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn Store>,
        generator: Arc<dyn Generator>,
        gateway: GatewayConfig,
    ) -> Self {
        Self {
            store,
            generator,
            gateway,
            events: EventBus::default(),
        }
    }

    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    /// Record `message`, ask the generator for an action, and persist the
    /// assistant summary plus a pending action for the plugin.
    pub async fn chat(&self, session_id: &str, message: &str) -> Result<ChatOutcome> {
        if session_id.trim().is_empty() || message.trim().is_empty() {
            return Err(RelayError::BadRequest(
                "sessionId and message are required".into(),
            ));
        }
        tracing::info!(session_id, "chat request");

        let user_turn = ChatTurn::new(session_id, Role::User, message);
        self.blocking({
            let turn = user_turn.clone();
            move |store: &dyn Store| store.insert_chat_turn(&turn)
        })
        .await?;
        self.events.publish(ChangeEvent::ChatTurn(user_turn));

        let snapshot = self.snapshot(session_id).await?;
        let context = snapshot
            .map(|s| s.structure)
            .unwrap_or_else(|| Value::Object(Default::default()));

        let request =
            prompt::build_request(&self.gateway, prompt::STRUCTURE_HEADER, &context, message);
        let action = self.run_generation(request).await?;

        let summary = action.summary();
        let assistant_turn = ChatTurn::new(session_id, Role::Assistant, summary.clone());
        let pending = PendingAction::new(session_id, action.clone());
        self.blocking({
            let turn = assistant_turn.clone();
            move |store: &dyn Store| store.insert_chat_turn(&turn)
        })
        .await?;
        self.events.publish(ChangeEvent::ChatTurn(assistant_turn));

        self.blocking({
            let pending = pending.clone();
            move |store: &dyn Store| store.insert_pending_action(&pending)
        })
        .await?;
        tracing::info!(
            session_id,
            action = %action.kind(),
            name = action.name(),
            "pending action stored"
        );
        self.events.publish(ChangeEvent::PendingAction(pending));

        Ok(ChatOutcome {
            message: summary,
            action,
        })
    }

    /// Stateless generation: nothing is persisted.
    pub async fn generate(&self, prompt_text: &str, context: Option<&Value>) -> Result<Action> {
        if prompt_text.trim().is_empty() {
            return Err(RelayError::BadRequest(
                "prompt is required and must be a string".into(),
            ));
        }
        tracing::info!("generate request");

        let empty = Value::Object(Default::default());
        let context = match context {
            None | Some(Value::Null) => &empty,
            Some(ctx) => ctx,
        };
        let request =
            prompt::build_request(&self.gateway, prompt::CONTEXT_HEADER, context, prompt_text);
        self.run_generation(request).await
    }

    /// Register the plugin's session heartbeat and replace its structure snapshot.
    /// The structure must be a JSON object or array.
    pub async fn sync_structure(&self, session_id: &str, structure: Value) -> Result<Snapshot> {
        let is_tree = matches!(structure, Value::Object(_) | Value::Array(_));
        if session_id.trim().is_empty() || !is_tree {
            return Err(RelayError::BadRequest(
                "sessionId and structure are required".into(),
            ));
        }

        let now = Utc::now();
        let snapshot = Snapshot {
            session_id: session_id.to_string(),
            structure,
            updated_at: now,
        };
        self.blocking({
            let snapshot = snapshot.clone();
            move |store: &dyn Store| {
                store.touch_session(&snapshot.session_id, now)?;
                store.upsert_snapshot(&snapshot)
            }
        })
        .await?;
        tracing::debug!(session_id, "structure synced");

        self.events.publish(ChangeEvent::Snapshot {
            session_id: snapshot.session_id.clone(),
            updated_at: snapshot.updated_at,
        });
        Ok(snapshot)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn chat_history(&self, session_id: &str) -> Result<Vec<ChatTurn>> {
        let session_id = session_id.to_string();
        self.blocking(move |store: &dyn Store| store.list_chat_turns(&session_id))
            .await
    }

    pub async fn pending_actions(&self, session_id: &str) -> Result<Vec<PendingAction>> {
        let session_id = session_id.to_string();
        self.blocking(move |store: &dyn Store| store.list_pending_actions(&session_id))
            .await
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<Option<Snapshot>> {
        let session_id = session_id.to_string();
        self.blocking(move |store: &dyn Store| store.latest_snapshot(&session_id))
            .await
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn run_generation(&self, request: GenerationRequest) -> Result<Action> {
        let reply = self.generator.generate(request).await.map_err(|e| {
            tracing::error!(error = %e, "generator call failed");
            RelayError::Provider(e)
        })?;
        tracing::debug!(reply = %reply, "generator reply");

        parse_action(&reply).inspect_err(|e| {
            tracing::warn!(error = %e, "assistant reply rejected");
        })
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn Store) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| RelayError::Store(format!("task join error: {e}")))?
    }
}
