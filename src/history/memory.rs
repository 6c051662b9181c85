use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use super::domain::{DecisionRecord, NewDecisionRecord};
use super::store::{DecisionStore, HistorySnapshot, StoreError};

/// Non-durable [`DecisionStore`] with the same id and snapshot contract as
/// the SQLite store. Used by tests and demo harnesses.
pub struct InMemoryDecisionStore {
    inner: Mutex<Inner>,
    snapshots: watch::Sender<HistorySnapshot>,
}

struct Inner {
    records: Vec<DecisionRecord>,
    next_id: i64,
}

impl Default for InMemoryDecisionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDecisionStore {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        Self {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                next_id: 1,
            }),
            snapshots,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }

    fn publish(&self, inner: &Inner) {
        let mut snapshot = inner.records.clone();
        snapshot.reverse();
        // send_replace keeps the stored value current even with no
        // subscribers, so a later subscribe still replays full state.
        self.snapshots.send_replace(snapshot);
    }
}

impl DecisionStore for InMemoryDecisionStore {
    fn insert(&self, record: NewDecisionRecord) -> Result<i64, StoreError> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.push(record.into_record(id));
        self.publish(&inner);
        Ok(id)
    }

    fn all(&self) -> Result<Vec<DecisionRecord>, StoreError> {
        let inner = self.lock()?;
        let mut records = inner.records.clone();
        records.reverse();
        Ok(records)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let position = inner
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        inner.records.remove(position);
        self.publish(&inner);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.records.clear();
        self.publish(&inner);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<HistorySnapshot> {
        self.snapshots.subscribe()
    }
}
