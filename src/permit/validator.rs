use chrono::{DateTime, Utc};

use super::parser::PermitInfo;

/// Zone required for boarding unless the operator configures another one.
pub const DEFAULT_REQUIRED_ZONE: &str = "B";

/// Outcome of running the eligibility rules over a parsed permit.
///
/// `reasons` is empty exactly when `ok` is true; violations are listed in
/// rule order (zone, status, expiry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ValidationResult {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            ok: reasons.is_empty(),
            reasons,
        }
    }

    /// Single joined reason string suitable for a persisted REJECT record.
    pub fn joined_reasons(&self) -> Option<String> {
        if self.reasons.is_empty() {
            None
        } else {
            Some(self.reasons.join("; "))
        }
    }
}

/// Stateless evaluator applying the eligibility rules to a permit.
///
/// The current instant is an explicit argument of [`validate_at`] so the
/// expiry rule stays deterministic under test; [`validate`] is the
/// wall-clock convenience used by the scan flow.
///
/// [`validate_at`]: ValidationEngine::validate_at
/// [`validate`]: ValidationEngine::validate
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    required_zone: String,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_ZONE)
    }
}

impl ValidationEngine {
    pub fn new(required_zone: impl Into<String>) -> Self {
        Self {
            required_zone: required_zone.into(),
        }
    }

    pub fn required_zone(&self) -> &str {
        &self.required_zone
    }

    pub fn validate(&self, info: &PermitInfo) -> ValidationResult {
        self.validate_at(info, Utc::now())
    }

    /// Apply every rule and report all violations together, in rule order.
    pub fn validate_at(&self, info: &PermitInfo, now: DateTime<Utc>) -> ValidationResult {
        let mut reasons = Vec::new();

        if !info.zones.iter().any(|zone| zone == &self.required_zone) {
            reasons.push(format!(
                "Invalid zone: required '{}' but got [{}]",
                self.required_zone,
                info.zones.join(", ")
            ));
        }

        if !info.status.eq_ignore_ascii_case("active") {
            reasons.push(format!("Status is not active: {}", info.status));
        }

        // An unparseable valid_to reports the format violation and then
        // falls back to the minimum instant, so the expiry rule fires too.
        let valid_to = match DateTime::parse_from_rfc3339(&info.valid_to) {
            Ok(parsed) => parsed.with_timezone(&Utc),
            Err(_) => {
                reasons.push(format!(
                    "Invalid valid_to format (expected ISO-8601): {}",
                    info.valid_to
                ));
                DateTime::<Utc>::MIN_UTC
            }
        };
        if valid_to < now {
            reasons.push(format!("Permit expired at {}", info.valid_to));
        }

        ValidationResult::from_reasons(reasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn permit(zones: &[&str], status: &str, valid_to: &str) -> PermitInfo {
        PermitInfo {
            permit_no: "HFTP-RAAP-2025-008901".to_string(),
            name: "Yang Min".to_string(),
            zones: zones.iter().map(|zone| zone.to_string()).collect(),
            status: status.to_string(),
            valid_to: valid_to.to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid instant")
    }

    #[test]
    fn clean_permit_passes() {
        let engine = ValidationEngine::default();
        let result = engine.validate_at(&permit(&["B"], "active", "2999-01-01T00:00:00+00:00"), now());
        assert!(result.ok);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn status_check_is_case_insensitive() {
        let engine = ValidationEngine::default();
        let result = engine.validate_at(&permit(&["B"], "Active", "2999-01-01T00:00:00+00:00"), now());
        assert!(result.ok, "unexpected reasons: {:?}", result.reasons);
    }

    #[test]
    fn missing_zone_is_reported_with_actual_list() {
        let engine = ValidationEngine::default();
        let result = engine.validate_at(&permit(&["A", "C"], "active", "2999-01-01T00:00:00+00:00"), now());
        assert!(!result.ok);
        assert_eq!(
            result.reasons,
            vec!["Invalid zone: required 'B' but got [A, C]".to_string()]
        );
    }

    #[test]
    fn zone_membership_is_case_sensitive() {
        let engine = ValidationEngine::default();
        let result = engine.validate_at(&permit(&["b"], "active", "2999-01-01T00:00:00+00:00"), now());
        assert!(!result.ok);
    }

    #[test]
    fn expired_permit_is_reported_with_literal_value() {
        let engine = ValidationEngine::default();
        let result = engine.validate_at(&permit(&["B"], "active", "2020-01-01T00:00:00+00:00"), now());
        assert_eq!(
            result.reasons,
            vec!["Permit expired at 2020-01-01T00:00:00+00:00".to_string()]
        );
    }

    #[test]
    fn unparseable_valid_to_reports_format_and_expiry() {
        let engine = ValidationEngine::default();
        let result = engine.validate_at(&permit(&["B"], "active", "next tuesday"), now());
        assert_eq!(
            result.reasons,
            vec![
                "Invalid valid_to format (expected ISO-8601): next tuesday".to_string(),
                "Permit expired at next tuesday".to_string(),
            ]
        );
    }

    #[test]
    fn all_violations_accumulate_in_rule_order() {
        let engine = ValidationEngine::default();
        let result =
            engine.validate_at(&permit(&["A"], "inactive", "2020-01-01T00:00:00+00:00"), now());
        assert!(!result.ok);
        assert_eq!(result.reasons.len(), 3);
        assert!(result.reasons[0].starts_with("Invalid zone"));
        assert!(result.reasons[1].starts_with("Status is not active"));
        assert!(result.reasons[2].starts_with("Permit expired"));
    }

    #[test]
    fn custom_required_zone_is_honored() {
        let engine = ValidationEngine::new("C");
        let result = engine.validate_at(&permit(&["C"], "active", "2999-01-01T00:00:00+00:00"), now());
        assert!(result.ok);
    }

    #[test]
    fn joined_reasons_uses_semicolon_separator() {
        let engine = ValidationEngine::default();
        let result =
            engine.validate_at(&permit(&["A"], "inactive", "2999-01-01T00:00:00+00:00"), now());
        let joined = result.joined_reasons().expect("reasons present");
        assert_eq!(joined.matches("; ").count(), 1);
    }

    #[test]
    fn offset_timestamps_compare_against_the_same_instant() {
        let engine = ValidationEngine::default();
        // 11:00+08:00 is 03:00 UTC, nine hours before `now`.
        let result = engine.validate_at(&permit(&["B"], "active", "2025-06-01T11:00:00+08:00"), now());
        assert!(!result.ok);
    }
}
