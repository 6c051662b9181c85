//! Scan-and-decide flow composing the parser, validation engine, and store.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::history::{Decision, DecisionStore, NewDecisionRecord, StoreError};
use crate::permit::{parse, ParseError, PermitInfo, ValidationEngine, ValidationResult};

/// Parsed-and-validated payload awaiting the operator's decision.
///
/// `scanned_at` is captured once at review time; accept and reject share it.
#[derive(Debug, Clone)]
pub struct ScanReview {
    pub info: PermitInfo,
    pub validation: ValidationResult,
    pub scanned_at: String,
}

/// Error raised by the scan service.
#[derive(Debug, thiserror::Error)]
pub enum ScanServiceError {
    /// Accept was requested for a permit that failed validation; the
    /// operator can only record such a scan as a rejection.
    #[error("permit is not eligible; record the decision as a rejection")]
    NotEligible,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service driving a single operator's scan queue.
pub struct ScanService<S> {
    engine: ValidationEngine,
    store: Arc<S>,
}

impl<S> ScanService<S>
where
    S: DecisionStore + 'static,
{
    pub fn new(store: Arc<S>, engine: ValidationEngine) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    /// Parse and validate a raw payload into a pending review.
    pub fn review(&self, raw: &str) -> Result<ScanReview, ParseError> {
        self.review_at(raw, Utc::now())
    }

    /// Deterministic variant of [`review`](Self::review) used by tests.
    pub fn review_at(&self, raw: &str, now: DateTime<Utc>) -> Result<ScanReview, ParseError> {
        let info = parse(raw)?;
        let validation = self.engine.validate_at(&info, now);
        Ok(ScanReview {
            info,
            validation,
            scanned_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// Persist an ACCEPT record. Only an eligible permit can be accepted;
    /// the decision counts as recorded only once the insert succeeds.
    pub fn accept(&self, review: &ScanReview) -> Result<i64, ScanServiceError> {
        if !review.validation.ok {
            return Err(ScanServiceError::NotEligible);
        }
        let id = self
            .store
            .insert(record_from_review(review, Decision::Accept, None))?;
        info!(permit_no = %review.info.permit_no, id, "recorded accepted boarding");
        Ok(id)
    }

    /// Persist a REJECT record carrying the violation reasons, or the
    /// operator fallback when a clean permit is turned away.
    pub fn reject(&self, review: &ScanReview) -> Result<i64, ScanServiceError> {
        let reason = review
            .validation
            .joined_reasons()
            .unwrap_or_else(|| "Rejected by operator".to_string());
        let id = self
            .store
            .insert(record_from_review(review, Decision::Reject, Some(reason)))?;
        info!(permit_no = %review.info.permit_no, id, "recorded rejected boarding");
        Ok(id)
    }
}

fn record_from_review(
    review: &ScanReview,
    result: Decision,
    reason: Option<String>,
) -> NewDecisionRecord {
    NewDecisionRecord {
        permit_no: review.info.permit_no.clone(),
        name: review.info.name.clone(),
        zones: review.info.zones.join(","),
        status: review.info.status.clone(),
        valid_to: review.info.valid_to.clone(),
        scanned_at: review.scanned_at.clone(),
        result,
        reason,
    }
}
