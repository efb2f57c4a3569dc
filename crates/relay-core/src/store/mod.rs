//! Durable storage for chat turns, structure snapshots, and pending actions.
//!
//! `Store` is synchronous; async callers run it under `spawn_blocking`.
//! `RelayDb` is the redb-backed implementation, `MemoryStore` backs tests.

pub mod db;
pub mod memory;

pub use db::RelayDb;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::{ChatTurn, PendingAction, Snapshot, StudioSession};

pub trait Store: Send + Sync {
    /// Create the session on first sight, otherwise refresh its heartbeat.
    fn touch_session(&self, session_id: &str, now: DateTime<Utc>) -> Result<StudioSession>;

    fn get_session(&self, session_id: &str) -> Result<Option<StudioSession>>;

    fn insert_chat_turn(&self, turn: &ChatTurn) -> Result<()>;

    /// All turns for `session_id`, oldest first.
    fn list_chat_turns(&self, session_id: &str) -> Result<Vec<ChatTurn>>;

    /// Replace the session's snapshot; there is at most one per session.
    fn upsert_snapshot(&self, snapshot: &Snapshot) -> Result<()>;

    fn latest_snapshot(&self, session_id: &str) -> Result<Option<Snapshot>>;

    fn insert_pending_action(&self, pending: &PendingAction) -> Result<()>;

    /// All pending actions for `session_id`, oldest first.
    fn list_pending_actions(&self, session_id: &str) -> Result<Vec<PendingAction>>;
}
