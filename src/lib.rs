//! Boarding-permit verification core.
//!
//! The crate covers the logic between a decoded QR payload and the operator's
//! audit trail: parsing the permit record, applying the eligibility rules,
//! persisting ACCEPT/REJECT decisions, and filtering/exporting the history.
//! Scanning hardware, image handling, and UI concerns live in the embedding
//! application.

pub mod config;
pub mod error;
pub mod history;
pub mod permit;
pub mod scan;
pub mod telemetry;

pub use error::AppError;
pub use history::{
    export_csv, filter_records, Decision, DecisionRecord, DecisionStore, FilterCriteria,
    NewDecisionRecord, StatusFilter, StoreError,
};
pub use permit::{ParseError, PermitInfo, ValidationEngine, ValidationResult};
pub use scan::{ScanReview, ScanService, ScanServiceError};
