//! Repository for the `erp_adapter_requests` table.

use erp_adapter_core::asset_type::{AssetType, DirectionCharacteristic};
use erp_adapter_core::erp_request::ErpAdapterRequest;
use erp_adapter_core::types::{RequestId, Timestamp};
use sqlx::PgPool;

use crate::models::erp_adapter_request::ErpAdapterRequestRow;

/// Column list for erp_adapter_requests queries.
const COLUMNS: &str = "id, partner_bpnl, request_type, samm_version, request_date, \
    response_code, response_received_date, own_material_number, direction_characteristic, \
    created_at, updated_at";

/// Provides CRUD operations for ERP adapter requests.
pub struct ErpAdapterRequestRepo;

impl ErpAdapterRequestRepo {
    /// Insert a validated record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        request: &ErpAdapterRequest,
    ) -> Result<ErpAdapterRequestRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO erp_adapter_requests
                (id, partner_bpnl, request_type, samm_version, request_date,
                 response_code, response_received_date, own_material_number,
                 direction_characteristic)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ErpAdapterRequestRow>(&query)
            .bind(request.id())
            .bind(request.partner_bpnl())
            .bind(request.request_type().as_str())
            .bind(request.samm_version())
            .bind(request.request_date())
            .bind(request.response_code())
            .bind(request.response_received_date())
            .bind(request.own_material_number())
            .bind(request.direction_characteristic().map(|d| d.as_str()))
            .fetch_one(pool)
            .await
    }

    /// Find a request by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: RequestId,
    ) -> Result<Option<ErpAdapterRequestRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM erp_adapter_requests WHERE id = $1");
        sqlx::query_as::<_, ErpAdapterRequestRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all requests, newest request date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ErpAdapterRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM erp_adapter_requests ORDER BY request_date DESC, id"
        );
        sqlx::query_as::<_, ErpAdapterRequestRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Unanswered requests issued strictly before `cutoff`, oldest first.
    ///
    /// Used by schedulers deciding whether to re-send.
    pub async fn list_unanswered_issued_before(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<Vec<ErpAdapterRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM erp_adapter_requests
             WHERE response_code IS NULL
               AND response_received_date IS NULL
               AND request_date < $1
             ORDER BY request_date ASC, id"
        );
        sqlx::query_as::<_, ErpAdapterRequestRow>(&query)
            .bind(cutoff)
            .fetch_all(pool)
            .await
    }

    /// Most recent request for a partner, material and request type.
    ///
    /// A `None` direction only matches rows without a direction.
    pub async fn find_latest(
        pool: &PgPool,
        partner_bpnl: &str,
        own_material_number: &str,
        request_type: AssetType,
        direction: Option<DirectionCharacteristic>,
    ) -> Result<Option<ErpAdapterRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM erp_adapter_requests
             WHERE partner_bpnl = $1
               AND own_material_number = $2
               AND request_type = $3
               AND direction_characteristic IS NOT DISTINCT FROM $4
             ORDER BY request_date DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ErpAdapterRequestRow>(&query)
            .bind(partner_bpnl)
            .bind(own_material_number)
            .bind(request_type.as_str())
            .bind(direction.map(|d| d.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Atomically record a response. Returns `true` if this call answered the request.
    ///
    /// The update only applies to an unanswered row whose request date is not
    /// after `received_at`, so concurrent duplicate deliveries answer it once.
    pub async fn mark_answered(
        pool: &PgPool,
        id: RequestId,
        response_code: i32,
        received_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE erp_adapter_requests
             SET response_code = $2, response_received_date = $3, updated_at = NOW()
             WHERE id = $1
               AND response_code IS NULL
               AND response_received_date IS NULL
               AND request_date <= $3",
        )
        .bind(id)
        .bind(response_code)
        .bind(received_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a request. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: RequestId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM erp_adapter_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
