use std::sync::Arc;

use relay_core::events::EventBus;
use relay_core::Orchestrator;

/// Shared application state passed to all route handlers.
///
/// Holds no per-session data: every handler receives the session id from the
/// request and goes through the orchestrator.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    pub fn events(&self) -> &EventBus {
        self.orchestrator.events()
    }
}
