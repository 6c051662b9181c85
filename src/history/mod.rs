//! Decision history: persistence, filtering, and CSV export.

pub mod domain;
pub mod export;
pub mod filter;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use domain::{Decision, DecisionRecord, FilterCriteria, NewDecisionRecord, StatusFilter};
pub use export::{export_csv, export_filename, ExportError};
pub use filter::{filter_records, filter_records_in_zone};
pub use memory::InMemoryDecisionStore;
pub use sqlite::SqliteDecisionStore;
pub use store::{DecisionStore, HistorySnapshot, StoreError};
