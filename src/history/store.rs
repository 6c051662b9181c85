use tokio::sync::watch;

use super::domain::{DecisionRecord, NewDecisionRecord};

/// Full-log snapshot published to subscribers, newest record first.
pub type HistorySnapshot = Vec<DecisionRecord>;

/// Storage abstraction for the decision log.
///
/// Implementations assign unique, strictly increasing ids for the lifetime
/// of the store (ids are never reused after `delete` or `clear`), serialize
/// writes, and never expose a partially applied mutation. `subscribe`
/// realizes the reactive query contract: the receiver's current value is the
/// latest committed snapshot and every committed mutation publishes a new
/// one, so each subscriber replays full state before seeing updates.
pub trait DecisionStore: Send + Sync {
    /// Append an immutable record, returning the assigned id.
    fn insert(&self, record: NewDecisionRecord) -> Result<i64, StoreError>;

    /// Full record set ordered by id descending (newest first).
    fn all(&self) -> Result<Vec<DecisionRecord>, StoreError>;

    /// Remove a single record. Part of the storage contract; the scan flow
    /// never calls it.
    fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Atomically remove every record.
    fn clear(&self) -> Result<(), StoreError>;

    /// Subscribe to committed snapshots of the full log.
    fn subscribe(&self) -> watch::Receiver<HistorySnapshot>;
}

/// Failure talking to the underlying storage medium.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: id {0}")]
    NotFound(i64),
    #[error("decision store unavailable: {0}")]
    Unavailable(String),
    #[error("decision store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(Box::new(value))
    }
}
