//! Shared string patterns for identifier fields.
//!
//! The raw pattern strings are public so other layers (e.g. database CHECK
//! constraints or API docs) can reuse them instead of duplicating them.

use std::sync::LazyLock;

use regex::Regex;

/// Business partner number of a legal entity: `BPNL` followed by 12 alphanumerics.
pub const BPNL_PATTERN: &str = r"^BPNL[0-9a-zA-Z]{12}$";

/// At least one character, none of which is vertical whitespace.
///
/// Vertical whitespace covers LF, VT, FF, CR, NEL, LINE SEPARATOR and
/// PARAGRAPH SEPARATOR.
pub const NON_EMPTY_NON_VERTICAL_WHITESPACE_PATTERN: &str =
    r"^[^\n\x0B\x0C\r\x{85}\x{2028}\x{2029}]+$";

pub static BPNL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BPNL_PATTERN).expect("valid regex"));

pub static NON_EMPTY_NON_VERTICAL_WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(NON_EMPTY_NON_VERTICAL_WHITESPACE_PATTERN).expect("valid regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bpnl_pattern_compiles_and_anchors() {
        assert!(BPNL_RE.is_match("BPNL000000000000"));
        assert!(!BPNL_RE.is_match("xBPNL000000000000"));
        assert!(!BPNL_RE.is_match("BPNL000000000000x"));
    }

    #[test]
    fn non_vertical_whitespace_pattern_allows_tabs_and_spaces() {
        assert!(NON_EMPTY_NON_VERTICAL_WHITESPACE_RE.is_match("a\tb c"));
        assert!(!NON_EMPTY_NON_VERTICAL_WHITESPACE_RE.is_match("a\nb"));
    }
}
