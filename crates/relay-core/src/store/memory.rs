use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::Store;
use crate::error::{RelayError, Result};
use crate::types::{ChatTurn, PendingAction, Snapshot, StudioSession};

/// In-memory store for tests. Not durable.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<String, StudioSession>,
    turns: Vec<ChatTurn>,
    snapshots: HashMap<String, Snapshot>,
    pending: Vec<PendingAction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| RelayError::Store("memory store poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn touch_session(&self, session_id: &str, now: DateTime<Utc>) -> Result<StudioSession> {
        let mut inner = self.lock()?;
        let session = inner
            .sessions
            .entry(session_id.to_string())
            .and_modify(|s| s.last_heartbeat = now)
            .or_insert_with(|| StudioSession {
                session_id: session_id.to_string(),
                created_at: now,
                last_heartbeat: now,
            });
        Ok(session.clone())
    }

    fn get_session(&self, session_id: &str) -> Result<Option<StudioSession>> {
        Ok(self.lock()?.sessions.get(session_id).cloned())
    }

    fn insert_chat_turn(&self, turn: &ChatTurn) -> Result<()> {
        self.lock()?.turns.push(turn.clone());
        Ok(())
    }

    fn list_chat_turns(&self, session_id: &str) -> Result<Vec<ChatTurn>> {
        let mut turns: Vec<ChatTurn> = self
            .lock()?
            .turns
            .iter()
            .filter(|t| t.session_id == session_id)
            .cloned()
            .collect();
        turns.sort_by_key(|t| t.created_at);
        Ok(turns)
    }

    fn upsert_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        self.lock()?
            .snapshots
            .insert(snapshot.session_id.clone(), snapshot.clone());
        Ok(())
    }

    fn latest_snapshot(&self, session_id: &str) -> Result<Option<Snapshot>> {
        Ok(self.lock()?.snapshots.get(session_id).cloned())
    }

    fn insert_pending_action(&self, pending: &PendingAction) -> Result<()> {
        self.lock()?.pending.push(pending.clone());
        Ok(())
    }

    fn list_pending_actions(&self, session_id: &str) -> Result<Vec<PendingAction>> {
        let mut pending: Vec<PendingAction> = self
            .lock()?
            .pending
            .iter()
            .filter(|p| p.session_id == session_id)
            .cloned()
            .collect();
        pending.sort_by_key(|p| p.created_at);
        Ok(pending)
    }
}
