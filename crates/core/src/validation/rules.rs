//! Validation rule and error types.
//!
//! Every violation carries the field it applies to and the rule that failed,
//! so callers can render or map them without parsing messages.

use std::fmt;

use serde::Serialize;

use crate::asset_type::AssetType;
use crate::patterns::{BPNL_PATTERN, NON_EMPTY_NON_VERTICAL_WHITESPACE_PATTERN};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_PARTNER_BPNL: &str = "partner_bpnl";
pub const FIELD_REQUEST_TYPE: &str = "request_type";
pub const FIELD_SAMM_VERSION: &str = "samm_version";
pub const FIELD_REQUEST_DATE: &str = "request_date";
pub const FIELD_OWN_MATERIAL_NUMBER: &str = "own_material_number";
pub const FIELD_RESPONSE_CODE: &str = "response_code";
pub const FIELD_RESPONSE_RECEIVED_DATE: &str = "response_received_date";

// ---------------------------------------------------------------------------
// Format rules
// ---------------------------------------------------------------------------

/// A named string pattern a field must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatRule {
    Bpnl,
    NonEmptyNonVerticalWhitespace,
}

impl FormatRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bpnl => "bpnl",
            Self::NonEmptyNonVerticalWhitespace => "non_empty_non_vertical_whitespace",
        }
    }

    /// The regular expression backing this rule.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Bpnl => BPNL_PATTERN,
            Self::NonEmptyNonVerticalWhitespace => NON_EMPTY_NON_VERTICAL_WHITESPACE_PATTERN,
        }
    }
}

impl fmt::Display for FormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Individual errors
// ---------------------------------------------------------------------------

/// A string field does not match its pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field} must match the {rule} pattern, got {value:?}")]
pub struct FormatError {
    pub field: &'static str,
    pub rule: FormatRule,
    pub value: String,
}

/// The requested asset type is not in the configured allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Request type '{value}' is not supported. Supported types: {}", join_types(.allowed))]
pub struct UnsupportedRequestTypeError {
    pub value: AssetType,
    pub allowed: Vec<AssetType>,
}

fn join_types(types: &[AssetType]) -> String {
    if types.is_empty() {
        return "(none)".to_string();
    }
    types
        .iter()
        .map(AssetType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldViolation {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    UnsupportedRequestType(#[from] UnsupportedRequestTypeError),

    /// Only one of the two response fields is populated.
    #[error("response_code and response_received_date must be set together")]
    PartialResponse {
        response_code: Option<i32>,
        response_received_date: Option<Timestamp>,
    },

    #[error("response_received_date {response_received_date} precedes request_date {request_date}")]
    ResponseBeforeRequest {
        request_date: Timestamp,
        response_received_date: Timestamp,
    },
}

impl FieldViolation {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } => *field,
            Self::Format(e) => e.field,
            Self::UnsupportedRequestType(_) => FIELD_REQUEST_TYPE,
            Self::PartialResponse { .. } => FIELD_RESPONSE_CODE,
            Self::ResponseBeforeRequest { .. } => FIELD_RESPONSE_RECEIVED_DATE,
        }
    }

    /// Name of the rule that failed.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "required",
            Self::Format(e) => e.rule.as_str(),
            Self::UnsupportedRequestType(_) => "supported_request_type",
            Self::PartialResponse { .. } => "response_pairing",
            Self::ResponseBeforeRequest { .. } => "response_after_request",
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Every violation found while validating one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// All violations reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.field() == field)
    }

    pub fn has_violation(&self, field: &str, rule: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.field() == field && v.rule() == rule)
    }

    /// `Ok(())` when nothing was collected, otherwise the aggregate error.
    pub fn check(violations: Vec<FieldViolation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
