//! redb-backed `Store`.
//!
//! # Table design
//!
//! `SESSIONS` and `SNAPSHOTS` are keyed by session id (one row per session).
//! `CHAT_TURNS` and `PENDING_ACTIONS` use a composite key:
//! ```text
//! [ session_len: u16 BE | session_id bytes | timestamp_ns: u64 BE | uuid: 16 bytes ]
//! ```
//! The length prefix keeps sessions whose ids share a prefix apart, and the
//! big-endian timestamp makes byte order equal creation order, so a single
//! prefix range scan yields one session's rows oldest first.

use std::fmt::Display;
use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::Store;
use crate::error::{RelayError, Result};
use crate::types::{ChatTurn, PendingAction, Snapshot, StudioSession};

// ---------------------------------------------------------------------------
// Table definitions
// ---------------------------------------------------------------------------

/// Key: session id. Value: JSON-encoded record.
type SessionTable = TableDefinition<'static, &'static str, &'static [u8]>;
/// Key: composite row key. Value: JSON-encoded record.
type RowTable = TableDefinition<'static, &'static [u8], &'static [u8]>;

const SESSIONS: SessionTable = TableDefinition::new("studio_sessions");
const SNAPSHOTS: SessionTable = TableDefinition::new("game_structure");
const CHAT_TURNS: RowTable = TableDefinition::new("chat_messages");
const PENDING_ACTIONS: RowTable = TableDefinition::new("pending_actions");

// ---------------------------------------------------------------------------
// Key + codec helpers
// ---------------------------------------------------------------------------

fn db_err(e: impl Display) -> RelayError {
    RelayError::Store(e.to_string())
}

fn session_prefix(session_id: &str) -> Result<Vec<u8>> {
    let len = u16::try_from(session_id.len())
        .map_err(|_| RelayError::BadRequest("sessionId is too long".into()))?;
    let mut key = Vec::with_capacity(2 + session_id.len() + 24);
    key.extend_from_slice(&len.to_be_bytes());
    key.extend_from_slice(session_id.as_bytes());
    Ok(key)
}

fn row_key(session_id: &str, ts: DateTime<Utc>, id: Uuid) -> Result<Vec<u8>> {
    let mut key = session_prefix(session_id)?;
    // Consecutive writes in one request must not tie; uuid breaks exact ties.
    let ns = ts.timestamp_nanos_opt().unwrap_or(i64::MAX).max(0) as u64;
    key.extend_from_slice(&ns.to_be_bytes());
    key.extend_from_slice(id.as_bytes());
    Ok(key)
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(db_err)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(db_err)
}

// ---------------------------------------------------------------------------
// RelayDb
// ---------------------------------------------------------------------------

pub struct RelayDb {
    db: Database,
}

impl RelayDb {
    /// Open or create the database at `path`, creating every table up front
    /// so read transactions never see a missing table.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path).map_err(db_err)?;
        let wt = db.begin_write().map_err(db_err)?;
        wt.open_table(SESSIONS).map_err(db_err)?;
        wt.open_table(SNAPSHOTS).map_err(db_err)?;
        wt.open_table(CHAT_TURNS).map_err(db_err)?;
        wt.open_table(PENDING_ACTIONS).map_err(db_err)?;
        wt.commit().map_err(db_err)?;
        Ok(Self { db })
    }

    fn insert_row(&self, table_def: RowTable, key: &[u8], value: &[u8]) -> Result<()> {
        let wt = self.db.begin_write().map_err(db_err)?;
        {
            let mut table = wt.open_table(table_def).map_err(db_err)?;
            table.insert(key, value).map_err(db_err)?;
        }
        wt.commit().map_err(db_err)?;
        Ok(())
    }

    fn scan_session<T: DeserializeOwned>(
        &self,
        table_def: RowTable,
        session_id: &str,
    ) -> Result<Vec<T>> {
        let prefix = session_prefix(session_id)?;
        let rt = self.db.begin_read().map_err(db_err)?;
        let table = rt.open_table(table_def).map_err(db_err)?;

        let mut rows = Vec::new();
        for entry in table.range(prefix.as_slice()..).map_err(db_err)? {
            let (k, v) = entry.map_err(db_err)?;
            if !k.value().starts_with(&prefix) {
                break;
            }
            rows.push(decode(v.value())?);
        }
        Ok(rows)
    }

    fn get_by_session<T: DeserializeOwned>(
        &self,
        table_def: SessionTable,
        session_id: &str,
    ) -> Result<Option<T>> {
        let rt = self.db.begin_read().map_err(db_err)?;
        let table = rt.open_table(table_def).map_err(db_err)?;
        match table.get(session_id).map_err(db_err)? {
            Some(guard) => Ok(Some(decode(guard.value())?)),
            None => Ok(None),
        }
    }
}

impl Store for RelayDb {
    fn touch_session(&self, session_id: &str, now: DateTime<Utc>) -> Result<StudioSession> {
        let wt = self.db.begin_write().map_err(db_err)?;
        let session = {
            let mut table = wt.open_table(SESSIONS).map_err(db_err)?;
            let existing: Option<StudioSession> = match table.get(session_id).map_err(db_err)? {
                Some(guard) => Some(decode(guard.value())?),
                None => None,
            };
            let session = match existing {
                Some(mut s) => {
                    s.last_heartbeat = now;
                    s
                }
                None => StudioSession {
                    session_id: session_id.to_string(),
                    created_at: now,
                    last_heartbeat: now,
                },
            };
            table
                .insert(session_id, encode(&session)?.as_slice())
                .map_err(db_err)?;
            session
        };
        wt.commit().map_err(db_err)?;
        Ok(session)
    }

    fn get_session(&self, session_id: &str) -> Result<Option<StudioSession>> {
        self.get_by_session(SESSIONS, session_id)
    }

    fn insert_chat_turn(&self, turn: &ChatTurn) -> Result<()> {
        let key = row_key(&turn.session_id, turn.created_at, turn.id)?;
        self.insert_row(CHAT_TURNS, &key, &encode(turn)?)
    }

    fn list_chat_turns(&self, session_id: &str) -> Result<Vec<ChatTurn>> {
        self.scan_session(CHAT_TURNS, session_id)
    }

    fn upsert_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let value = encode(snapshot)?;
        let wt = self.db.begin_write().map_err(db_err)?;
        {
            let mut table = wt.open_table(SNAPSHOTS).map_err(db_err)?;
            table
                .insert(snapshot.session_id.as_str(), value.as_slice())
                .map_err(db_err)?;
        }
        wt.commit().map_err(db_err)?;
        Ok(())
    }

    fn latest_snapshot(&self, session_id: &str) -> Result<Option<Snapshot>> {
        self.get_by_session(SNAPSHOTS, session_id)
    }

    fn insert_pending_action(&self, pending: &PendingAction) -> Result<()> {
        let key = row_key(&pending.session_id, pending.created_at, pending.id)?;
        self.insert_row(PENDING_ACTIONS, &key, &encode(pending)?)
    }

    fn list_pending_actions(&self, session_id: &str) -> Result<Vec<PendingAction>> {
        self.scan_session(PENDING_ACTIONS, session_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
