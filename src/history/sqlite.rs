use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection};
use tokio::sync::watch;
use tracing::debug;

use super::domain::{Decision, DecisionRecord, NewDecisionRecord};
use super::store::{DecisionStore, HistorySnapshot, StoreError};

/// Busy timeout applied to the connection (ms).
const BUSY_TIMEOUT_MS: u64 = 5_000;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS decision_record (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    permit_no TEXT NOT NULL,
    name TEXT NOT NULL,
    zones TEXT NOT NULL,
    status TEXT NOT NULL,
    valid_to TEXT NOT NULL,
    scanned_at TEXT NOT NULL,
    result TEXT NOT NULL,
    reason TEXT
)";

/// Durable [`DecisionStore`] backed by a single-table SQLite database.
///
/// The connection sits behind a mutex: one insert/delete/clear completes
/// before the next begins, and every query observes the latest committed
/// write. `AUTOINCREMENT` keeps ids strictly increasing for the lifetime of
/// the database file, including across `clear`.
pub struct SqliteDecisionStore {
    conn: Mutex<Connection>,
    snapshots: watch::Sender<HistorySnapshot>,
}

impl SqliteDecisionStore {
    /// Open (or create) the database at `path` and bootstrap the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened decision store");
        Self::with_connection(conn)
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "journal_mode", "wal")?;
        conn.pragma_update(None, "synchronous", "full")?;
        conn.busy_timeout(std::time::Duration::from_millis(BUSY_TIMEOUT_MS))?;
        conn.execute(SCHEMA, [])?;

        let initial = query_all(&conn)?;
        let (snapshots, _) = watch::channel(initial);
        Ok(Self {
            conn: Mutex::new(conn),
            snapshots,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection mutex poisoned".to_string()))
    }

    fn publish(&self, conn: &Connection) -> Result<(), StoreError> {
        let snapshot = query_all(conn)?;
        // send_replace keeps the stored value current even with no
        // subscribers, so a later subscribe still replays full state.
        self.snapshots.send_replace(snapshot);
        Ok(())
    }
}

impl DecisionStore for SqliteDecisionStore {
    fn insert(&self, record: NewDecisionRecord) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO decision_record
                (permit_no, name, zones, status, valid_to, scanned_at, result, reason)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.permit_no,
                record.name,
                record.zones,
                record.status,
                record.valid_to,
                record.scanned_at,
                record.result.as_str(),
                record.reason,
            ],
        )?;
        let id = conn.last_insert_rowid();
        self.publish(&conn)?;
        Ok(id)
    }

    fn all(&self) -> Result<Vec<DecisionRecord>, StoreError> {
        let conn = self.lock()?;
        query_all(&conn)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM decision_record WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        self.publish(&conn)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM decision_record", [])?;
        debug!(removed, "cleared decision store");
        self.publish(&conn)
    }

    fn subscribe(&self) -> watch::Receiver<HistorySnapshot> {
        self.snapshots.subscribe()
    }
}

fn query_all(conn: &Connection) -> Result<Vec<DecisionRecord>, StoreError> {
    let mut statement = conn.prepare(
        "SELECT id, permit_no, name, zones, status, valid_to, scanned_at, result, reason
         FROM decision_record ORDER BY id DESC",
    )?;
    let rows = statement.query_map([], |row| {
        let raw_result: String = row.get(7)?;
        let result = Decision::from_str(&raw_result).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                format!("unknown decision '{raw_result}'").into(),
            )
        })?;
        Ok(DecisionRecord {
            id: row.get(0)?,
            permit_no: row.get(1)?,
            name: row.get(2)?,
            zones: row.get(3)?,
            status: row.get(4)?,
            valid_to: row.get(5)?,
            scanned_at: row.get(6)?,
            result,
            reason: row.get(8)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}
