//! Syntactic checks for identifier and version strings.
//!
//! Pure functions of the input and a fixed pattern from [`crate::patterns`].

use super::rules::{FormatError, FormatRule};
use crate::patterns::{BPNL_RE, NON_EMPTY_NON_VERTICAL_WHITESPACE_RE};

/// Validate that `value` is a legal-entity business partner number.
pub fn validate_bpnl(field: &'static str, value: &str) -> Result<(), FormatError> {
    check(field, value, FormatRule::Bpnl, BPNL_RE.is_match(value))
}

/// Validate that `value` is non-empty and free of vertical whitespace.
pub fn validate_non_empty_no_vertical_whitespace(
    field: &'static str,
    value: &str,
) -> Result<(), FormatError> {
    check(
        field,
        value,
        FormatRule::NonEmptyNonVerticalWhitespace,
        NON_EMPTY_NON_VERTICAL_WHITESPACE_RE.is_match(value),
    )
}

fn check(
    field: &'static str,
    value: &str,
    rule: FormatRule,
    matched: bool,
) -> Result<(), FormatError> {
    if matched {
        Ok(())
    } else {
        Err(FormatError {
            field,
            rule,
            value: value.to_string(),
        })
    }
}
