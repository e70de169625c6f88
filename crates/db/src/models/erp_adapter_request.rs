//! Row model for the `erp_adapter_requests` table.

use erp_adapter_core::asset_type::{AssetType, DirectionCharacteristic};
use erp_adapter_core::erp_request::{ErpAdapterRequest, ErpAdapterRequestParts};
use erp_adapter_core::types::{RequestId, Timestamp};
use erp_adapter_core::validation::allow_list::SupportedRequestTypes;
use serde::Serialize;
use sqlx::FromRow;

use crate::error::DbResult;

/// A row from the `erp_adapter_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ErpAdapterRequestRow {
    pub id: RequestId,
    pub partner_bpnl: String,
    pub request_type: String,
    pub samm_version: String,
    pub request_date: Timestamp,
    pub response_code: Option<i32>,
    pub response_received_date: Option<Timestamp>,
    pub own_material_number: String,
    pub direction_characteristic: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ErpAdapterRequestRow {
    /// Decode the enum columns into domain parts.
    pub fn to_parts(&self) -> DbResult<ErpAdapterRequestParts> {
        Ok(ErpAdapterRequestParts {
            id: self.id,
            partner_bpnl: self.partner_bpnl.clone(),
            request_type: self.request_type.parse::<AssetType>()?,
            samm_version: self.samm_version.clone(),
            request_date: self.request_date,
            own_material_number: self.own_material_number.clone(),
            direction_characteristic: self
                .direction_characteristic
                .as_deref()
                .map(str::parse::<DirectionCharacteristic>)
                .transpose()?,
            response_code: self.response_code,
            response_received_date: self.response_received_date,
        })
    }

    /// Rehydrate the domain record, re-checking its invariants.
    pub fn into_domain(self, supported: &SupportedRequestTypes) -> DbResult<ErpAdapterRequest> {
        let parts = self.to_parts()?;
        Ok(ErpAdapterRequest::restore(parts, supported)?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use erp_adapter_core::error::CoreError;
    use erp_adapter_core::validation::rules::FieldViolation;
    use uuid::Uuid;

    use super::*;
    use crate::error::DbError;

    fn row() -> ErpAdapterRequestRow {
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        ErpAdapterRequestRow {
            id: Uuid::new_v4(),
            partner_bpnl: "BPNL000000000000".to_string(),
            request_type: "ITEM_STOCK_SUBMODEL".to_string(),
            samm_version: "2.0".to_string(),
            request_date: t0,
            response_code: None,
            response_received_date: None,
            own_material_number: "MAT-42".to_string(),
            direction_characteristic: Some("INBOUND".to_string()),
            created_at: t0,
            updated_at: t0,
        }
    }

    #[test]
    fn unanswered_row_becomes_issued_record() {
        let r = row();
        let id = r.id;
        let request = r.into_domain(&SupportedRequestTypes::default()).unwrap();
        assert_eq!(request.id(), id);
        assert_eq!(request.request_type(), AssetType::ItemStockSubmodel);
        assert_eq!(
            request.direction_characteristic(),
            Some(DirectionCharacteristic::Inbound)
        );
        assert!(!request.is_answered());
    }

    #[test]
    fn answered_row_becomes_answered_record() {
        let mut r = row();
        r.response_code = Some(201);
        r.response_received_date = Some(r.request_date + Duration::minutes(3));
        let request = r.into_domain(&SupportedRequestTypes::default()).unwrap();
        assert_eq!(request.response_code(), Some(201));
    }

    #[test]
    fn unknown_request_type_is_rejected() {
        let mut r = row();
        r.request_type = "LEGACY_SUBMODEL".to_string();
        assert_matches!(r.to_parts(), Err(DbError::Core(CoreError::Config(_))));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let mut r = row();
        r.direction_characteristic = Some("SIDEWAYS".to_string());
        assert!(r.to_parts().is_err());
    }

    #[test]
    fn half_answered_row_is_rejected() {
        let mut r = row();
        r.response_code = Some(200);
        assert_matches!(
            r.into_domain(&SupportedRequestTypes::default()),
            Err(DbError::Core(CoreError::Validation(e)))
                if matches!(e.violations[..], [FieldViolation::PartialResponse { .. }])
        );
    }
}
