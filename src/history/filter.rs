use chrono::{DateTime, Local, NaiveDate, TimeZone};

use super::domain::{DecisionRecord, FilterCriteria};

/// Filter the decision log in the operator's local time zone.
pub fn filter_records(records: &[DecisionRecord], criteria: &FilterCriteria) -> Vec<DecisionRecord> {
    filter_records_in_zone(records, criteria, &Local)
}

/// Filter the decision log, deriving each record's calendar date from
/// `scanned_at` interpreted in `zone`. Pure and order-preserving.
///
/// A record whose `scanned_at` does not parse cannot be placed on the
/// calendar: it is kept only while no date bound is set.
pub fn filter_records_in_zone<Tz: TimeZone>(
    records: &[DecisionRecord],
    criteria: &FilterCriteria,
    zone: &Tz,
) -> Vec<DecisionRecord> {
    records
        .iter()
        .filter(|record| {
            if !criteria.keeps_status(record.result) {
                return false;
            }
            match scanned_date(record, zone) {
                Some(date) => criteria.keeps_date(date),
                None => !criteria.has_date_bounds(),
            }
        })
        .cloned()
        .collect()
}

fn scanned_date<Tz: TimeZone>(record: &DecisionRecord, zone: &Tz) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&record.scanned_at)
        .ok()
        .map(|instant| instant.with_timezone(zone).date_naive())
}
