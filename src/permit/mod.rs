//! Permit payload parsing and eligibility validation.

pub mod parser;
pub mod validator;

pub use parser::{parse, ParseError, PermitInfo};
pub use validator::{ValidationEngine, ValidationResult, DEFAULT_REQUIRED_ZONE};
