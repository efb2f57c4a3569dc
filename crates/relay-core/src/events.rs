//! Change notifications fanned out to realtime subscribers (the chat and
//! file-tree views). Delivery is best-effort: a subscriber that lags past the
//! channel capacity loses the oldest events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::types::{ChatTurn, PendingAction};

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    ChatTurn(ChatTurn),
    #[serde(rename_all = "camelCase")]
    Snapshot {
        session_id: String,
        updated_at: DateTime<Utc>,
    },
    PendingAction(PendingAction),
}

impl ChangeEvent {
    pub fn session_id(&self) -> &str {
        match self {
            Self::ChatTurn(t) => &t.session_id,
            Self::Snapshot { session_id, .. } => session_id,
            Self::PendingAction(p) => &p.session_id,
        }
    }

    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChatTurn(_) => "chat_turn",
            Self::Snapshot { .. } => "snapshot",
            Self::PendingAction(_) => "pending_action",
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ChangeEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish to whoever is listening right now; no listeners is not an error.
    pub fn publish(&self, event: ChangeEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::default();
        bus.publish(ChangeEvent::Snapshot {
            session_id: "s1".into(),
            updated_at: Utc::now(),
        });
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();
        let turn = ChatTurn::new("s1", Role::User, "hello");
        bus.publish(ChangeEvent::ChatTurn(turn.clone()));

        let got = rx.recv().await.unwrap();
        assert_eq!(got.session_id(), "s1");
        assert_eq!(got.name(), "chat_turn");
        assert_eq!(got, ChangeEvent::ChatTurn(turn));
    }

    #[test]
    fn snapshot_event_serializes_with_kind_tag() {
        let ts = Utc::now();
        let json = serde_json::to_value(ChangeEvent::Snapshot {
            session_id: "s1".into(),
            updated_at: ts,
        })
        .unwrap();
        assert_eq!(json["kind"], "snapshot");
        assert_eq!(json["sessionId"], "s1");
    }
}
