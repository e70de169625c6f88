//! Validation pipeline for request records.
//!
//! Runs every field rule and collects all failures instead of stopping at the
//! first one.

use super::allow_list::{validate_request_type, SupportedRequestTypes};
use super::format::{validate_bpnl, validate_non_empty_no_vertical_whitespace};
use super::rules::{
    FieldViolation, ValidationError, FIELD_OWN_MATERIAL_NUMBER, FIELD_PARTNER_BPNL,
    FIELD_REQUEST_DATE, FIELD_REQUEST_TYPE, FIELD_SAMM_VERSION,
};
use crate::asset_type::AssetType;
use crate::types::Timestamp;

/// Accumulates violations from individual rules.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `Missing` violation when `value` is absent; pass it through otherwise.
    pub fn require<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.0.push(FieldViolation::Missing { field });
        }
        value
    }

    /// Record the error of a failed rule.
    pub fn check<E: Into<FieldViolation>>(&mut self, result: Result<(), E>) {
        if let Err(e) = result {
            self.0.push(e.into());
        }
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        ValidationError::check(self.0)
    }

    /// The collected violations as an error, whether or not any were found.
    pub fn into_error(self) -> ValidationError {
        ValidationError {
            violations: self.0,
        }
    }
}

/// Borrowed view of the fields a request record is validated on.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFields<'a> {
    pub partner_bpnl: Option<&'a str>,
    pub request_type: Option<AssetType>,
    pub samm_version: Option<&'a str>,
    pub request_date: Option<Timestamp>,
    pub own_material_number: Option<&'a str>,
}

/// Apply the record's field rules, collecting into `violations`.
pub fn collect_request_violations(
    fields: &RequestFields<'_>,
    supported: &SupportedRequestTypes,
    violations: &mut Violations,
) {
    if let Some(bpnl) = violations.require(FIELD_PARTNER_BPNL, fields.partner_bpnl) {
        violations.check(validate_bpnl(FIELD_PARTNER_BPNL, bpnl));
    }

    if let Some(request_type) = violations.require(FIELD_REQUEST_TYPE, fields.request_type) {
        violations.check(validate_request_type(request_type, supported));
    }

    if let Some(version) = violations.require(FIELD_SAMM_VERSION, fields.samm_version) {
        violations.check(validate_non_empty_no_vertical_whitespace(
            FIELD_SAMM_VERSION,
            version,
        ));
    }

    violations.require(FIELD_REQUEST_DATE, fields.request_date);

    if let Some(material) =
        violations.require(FIELD_OWN_MATERIAL_NUMBER, fields.own_material_number)
    {
        violations.check(validate_non_empty_no_vertical_whitespace(
            FIELD_OWN_MATERIAL_NUMBER,
            material,
        ));
    }
}

/// Validate a candidate record, reporting every violated rule.
pub fn validate_request_fields(
    fields: &RequestFields<'_>,
    supported: &SupportedRequestTypes,
) -> Result<(), ValidationError> {
    let mut violations = Violations::new();
    collect_request_violations(fields, supported, &mut violations);
    violations.finish()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn valid_fields() -> RequestFields<'static> {
        RequestFields {
            partner_bpnl: Some("BPNL000000000000"),
            request_type: Some(AssetType::ItemStockSubmodel),
            samm_version: Some("3.0"),
            request_date: Some(Utc::now()),
            own_material_number: Some("MAT-42"),
        }
    }

    #[test]
    fn valid_fields_pass() {
        let result = validate_request_fields(&valid_fields(), &SupportedRequestTypes::default());
        assert!(result.is_ok());
    }

    #[test]
    fn all_missing_reports_every_required_field() {
        let err = validate_request_fields(
            &RequestFields::default(),
            &SupportedRequestTypes::default(),
        )
        .unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field()).collect();
        assert_eq!(
            fields,
            vec![
                FIELD_PARTNER_BPNL,
                FIELD_REQUEST_TYPE,
                FIELD_SAMM_VERSION,
                FIELD_REQUEST_DATE,
                FIELD_OWN_MATERIAL_NUMBER,
            ]
        );
        assert!(err.violations.iter().all(|v| v.rule() == "required"));
    }

    #[test]
    fn collects_failures_across_fields() {
        let fields = RequestFields {
            partner_bpnl: Some("BPNS000000000000"),
            request_type: Some(AssetType::DemandSubmodel),
            samm_version: Some("3.0\n"),
            own_material_number: Some(""),
            ..valid_fields()
        };
        let err = validate_request_fields(&fields, &SupportedRequestTypes::default()).unwrap_err();
        assert_eq!(err.violations.len(), 4);
        assert!(err.has_violation(FIELD_PARTNER_BPNL, "bpnl"));
        assert!(err.has_violation(FIELD_REQUEST_TYPE, "supported_request_type"));
        assert!(err.has_violation(FIELD_SAMM_VERSION, "non_empty_non_vertical_whitespace"));
        assert!(err.has_violation(
            FIELD_OWN_MATERIAL_NUMBER,
            "non_empty_non_vertical_whitespace"
        ));
    }

    #[test]
    fn missing_field_skips_its_format_rule() {
        let fields = RequestFields {
            samm_version: None,
            ..valid_fields()
        };
        let err = validate_request_fields(&fields, &SupportedRequestTypes::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.has_violation(FIELD_SAMM_VERSION, "required"));
    }

    #[test]
    fn supported_set_is_injected() {
        let fields = RequestFields {
            request_type: Some(AssetType::DeliverySubmodel),
            ..valid_fields()
        };
        assert!(validate_request_fields(&fields, &SupportedRequestTypes::default()).is_err());

        let widened =
            SupportedRequestTypes::new([AssetType::ItemStockSubmodel, AssetType::DeliverySubmodel]);
        assert!(validate_request_fields(&fields, &widened).is_ok());
    }
}
