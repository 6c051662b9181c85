use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Operator decision recorded for a single scan event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "ACCEPT")]
    Accept,
    #[serde(rename = "REJECT")]
    Reject,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "ACCEPT" => Some(Self::Accept),
            "REJECT" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Immutable audit entry, one per completed scan-and-decision flow.
///
/// `zones` is kept comma-joined for display and export; `reason` is present
/// exactly when the record is a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: i64,
    pub permit_no: String,
    pub name: String,
    pub zones: String,
    pub status: String,
    pub valid_to: String,
    pub scanned_at: String,
    pub result: Decision,
    pub reason: Option<String>,
}

/// Record contents before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDecisionRecord {
    pub permit_no: String,
    pub name: String,
    pub zones: String,
    pub status: String,
    pub valid_to: String,
    pub scanned_at: String,
    pub result: Decision,
    pub reason: Option<String>,
}

impl NewDecisionRecord {
    pub(crate) fn into_record(self, id: i64) -> DecisionRecord {
        DecisionRecord {
            id,
            permit_no: self.permit_no,
            name: self.name,
            zones: self.zones,
            status: self.status,
            valid_to: self.valid_to,
            scanned_at: self.scanned_at,
            result: self.result,
            reason: self.reason,
        }
    }
}

/// History filter on the decision outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Accept,
    Reject,
}

impl StatusFilter {
    fn keeps(self, result: Decision) -> bool {
        match self {
            Self::All => true,
            Self::Accept => result == Decision::Accept,
            Self::Reject => result == Decision::Reject,
        }
    }
}

/// Criteria applied by the history filter.
///
/// Date bounds are inclusive and compare against the local calendar date
/// derived from `scanned_at`; an absent bound imposes no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub(crate) fn keeps_status(&self, result: Decision) -> bool {
        self.status.keeps(result)
    }

    pub(crate) fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    pub(crate) fn keeps_date(&self, date: NaiveDate) -> bool {
        let after_start = self.start_date.map_or(true, |start| date >= start);
        let before_end = self.end_date.map_or(true, |end| date <= end);
        after_start && before_end
    }
}
