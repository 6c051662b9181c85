//! End-to-end specifications for the scan-and-decide workflow driven through
//! the public service facade, backed by the in-memory store.

mod common {
    use std::sync::Arc;

    use boarding_permit::history::InMemoryDecisionStore;
    use boarding_permit::{ScanService, ValidationEngine};
    use chrono::{DateTime, TimeZone, Utc};

    pub(super) fn payload(zones: &[&str], status: &str, valid_to: &str) -> String {
        let zones = zones
            .iter()
            .map(|zone| format!("\"{zone}\""))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            r#"{{"permit_no":"HFTP-RAAP-2025-008901","name":"Yang Min","zones":[{zones}],"status":"{status}","valid_to":"{valid_to}"}}"#
        )
    }

    pub(super) fn service() -> (ScanService<InMemoryDecisionStore>, Arc<InMemoryDecisionStore>) {
        let store = Arc::new(InMemoryDecisionStore::new());
        let service = ScanService::new(Arc::clone(&store), ValidationEngine::default());
        (service, store)
    }

    pub(super) fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid instant")
    }
}

use boarding_permit::history::{Decision, DecisionStore};
use boarding_permit::ScanServiceError;

#[test]
fn accepting_an_eligible_permit_persists_an_accept_record() {
    let (service, store) = common::service();
    let review = service
        .review_at(
            &common::payload(&["A", "B"], "active", "2999-01-01T00:00:00+00:00"),
            common::now(),
        )
        .expect("payload parses");
    assert!(review.validation.ok);

    let id = service.accept(&review).expect("decision recorded");

    let records = store.all().expect("query");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, id);
    assert_eq!(record.permit_no, "HFTP-RAAP-2025-008901");
    assert_eq!(record.zones, "A,B");
    assert_eq!(record.result, Decision::Accept);
    assert_eq!(record.reason, None);
    assert_eq!(record.scanned_at, review.scanned_at);
}

#[test]
fn accepting_an_ineligible_permit_is_refused_and_nothing_is_stored() {
    let (service, store) = common::service();
    let review = service
        .review_at(
            &common::payload(&["A"], "active", "2999-01-01T00:00:00+00:00"),
            common::now(),
        )
        .expect("payload parses");
    assert!(!review.validation.ok);

    let err = service.accept(&review).expect_err("accept must be refused");
    assert!(matches!(err, ScanServiceError::NotEligible));
    assert!(store.all().expect("query").is_empty());
}

#[test]
fn rejecting_an_ineligible_permit_records_all_reasons_joined() {
    let (service, store) = common::service();
    let review = service
        .review_at(
            &common::payload(&["A"], "inactive", "2020-01-01T00:00:00+00:00"),
            common::now(),
        )
        .expect("payload parses");
    assert_eq!(review.validation.reasons.len(), 3);

    service.reject(&review).expect("decision recorded");

    let records = store.all().expect("query");
    let reason = records[0].reason.as_deref().expect("reject carries reason");
    assert_eq!(
        reason,
        "Invalid zone: required 'B' but got [A]; \
         Status is not active: inactive; \
         Permit expired at 2020-01-01T00:00:00+00:00"
    );
    assert_eq!(records[0].result, Decision::Reject);
}

#[test]
fn rejecting_a_clean_permit_uses_the_operator_fallback_reason() {
    let (service, store) = common::service();
    let review = service
        .review_at(
            &common::payload(&["B"], "Active", "2999-01-01T00:00:00+00:00"),
            common::now(),
        )
        .expect("payload parses");
    assert!(review.validation.ok);

    service.reject(&review).expect("decision recorded");

    let records = store.all().expect("query");
    assert_eq!(records[0].reason.as_deref(), Some("Rejected by operator"));
}

#[test]
fn malformed_payload_never_reaches_the_store() {
    let (service, store) = common::service();
    assert!(service.review_at("{not json", common::now()).is_err());
    assert!(service
        .review_at(r#"{"permit_no":"P-1","name":"A"}"#, common::now())
        .is_err());
    assert!(store.all().expect("query").is_empty());
}

#[test]
fn repeated_decisions_replay_newest_first() {
    let (service, store) = common::service();
    for n in 0..3 {
        let review = service
            .review_at(
                &common::payload(&["B"], "active", "2999-01-01T00:00:00+00:00"),
                common::now() + chrono::Duration::minutes(n),
            )
            .expect("payload parses");
        service.accept(&review).expect("decision recorded");
    }

    let records = store.all().expect("query");
    assert_eq!(records.len(), 3);
    assert!(records.windows(2).all(|pair| pair[0].id > pair[1].id));
}
