use serde::{Deserialize, Serialize};

/// Permit record carried inside a QR payload.
///
/// Every field stays textual exactly as it appeared in the payload; no
/// semantic interpretation happens before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitInfo {
    pub permit_no: String,
    pub name: String,
    pub zones: Vec<String>,
    pub status: String,
    pub valid_to: String,
}

/// Raised when a payload is not a JSON object with the five required fields.
#[derive(Debug, thiserror::Error)]
#[error("invalid permit payload: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Parse a raw decoded QR string into a [`PermitInfo`].
///
/// Parsing is lenient towards unknown keys but all-or-nothing: a missing or
/// mistyped required field fails the whole payload, never yielding a partial
/// record.
pub fn parse(raw: &str) -> Result<PermitInfo, ParseError> {
    Ok(serde_json::from_str(raw)?)
}
