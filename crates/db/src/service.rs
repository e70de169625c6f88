//! Issue and answer ERP adapter requests against the database.
//!
//! Combines the domain rules from `erp_adapter_core` with the repository's
//! conditional update, so a request is answered at most once even when
//! duplicate responses arrive concurrently.

use std::sync::Arc;

use erp_adapter_core::config::AdapterConfig;
use erp_adapter_core::erp_request::{
    CreateErpAdapterRequest, ErpAdapterRequest, InvalidTransitionError,
};
use erp_adapter_core::error::CoreError;
use erp_adapter_core::ids::{IdGenerator, UuidV4Generator};
use erp_adapter_core::types::{truncate_to_micros, RequestId, Timestamp};
use erp_adapter_core::validation::allow_list::{SharedSupportedTypes, SupportedTypesSource};

use crate::error::DbResult;
use crate::repositories::ErpAdapterRequestRepo;
use crate::DbPool;

/// Entity name used in `NotFound` errors.
const ENTITY: &str = "erp_adapter_request";

/// Request lifecycle operations backed by PostgreSQL.
///
/// Cheaply cloneable.
#[derive(Clone)]
pub struct ErpAdapterRequestService {
    pool: DbPool,
    supported: Arc<dyn SupportedTypesSource>,
    ids: Arc<dyn IdGenerator>,
}

impl ErpAdapterRequestService {
    pub fn new(
        pool: DbPool,
        supported: Arc<dyn SupportedTypesSource>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            pool,
            supported,
            ids,
        }
    }

    /// Build a service with a runtime-replaceable supported type set seeded
    /// from `config`, and random UUIDs.
    ///
    /// Returns the shared set so callers can widen it later.
    pub fn from_config(pool: DbPool, config: &AdapterConfig) -> (Self, SharedSupportedTypes) {
        let shared = SharedSupportedTypes::new(config.supported_types.clone());
        let service = Self::new(pool, Arc::new(shared.clone()), Arc::new(UuidV4Generator));
        (service, shared)
    }

    /// Validate `input` and persist it as a new, unanswered request.
    ///
    /// Returns the record as stored.
    pub async fn issue(&self, input: CreateErpAdapterRequest) -> DbResult<ErpAdapterRequest> {
        let request =
            match ErpAdapterRequest::create(input, self.supported.as_ref(), self.ids.as_ref()) {
                Ok(request) => request,
                Err(e) => {
                    tracing::debug!(
                        violations = e.violations.len(),
                        error = %e,
                        "ERP adapter request rejected"
                    );
                    return Err(e.into());
                }
            };

        let request = ErpAdapterRequestRepo::create(&self.pool, &request)
            .await?
            .into_domain(&self.supported.supported_types())?;

        tracing::info!(
            request_id = %request.id(),
            partner_bpnl = request.partner_bpnl(),
            request_type = %request.request_type(),
            own_material_number = request.own_material_number(),
            "ERP adapter request issued"
        );

        Ok(request)
    }

    /// Load a request by ID.
    pub async fn get(&self, id: RequestId) -> DbResult<ErpAdapterRequest> {
        let row = ErpAdapterRequestRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

        tracing::debug!(request_id = %id, "ERP adapter request loaded");

        row.into_domain(&self.supported.supported_types())
    }

    /// Correlate a partner response with its request.
    ///
    /// Fails with [`InvalidTransitionError`] if the request is already
    /// answered (including by a concurrent call) or if `received_at`
    /// precedes the request date.
    pub async fn record_response(
        &self,
        id: RequestId,
        response_code: i32,
        received_at: Timestamp,
    ) -> DbResult<ErpAdapterRequest> {
        let received_at = truncate_to_micros(received_at);
        let mut request = self.get(id).await?;

        if let Err(e) = request.check_answerable(received_at) {
            tracing::warn!(request_id = %id, response_code, error = %e, "Response rejected");
            return Err(e.into());
        }

        let applied =
            ErpAdapterRequestRepo::mark_answered(&self.pool, id, response_code, received_at)
                .await?;

        if !applied {
            if ErpAdapterRequestRepo::find_by_id(&self.pool, id).await?.is_none() {
                return Err(CoreError::NotFound { entity: ENTITY, id }.into());
            }
            tracing::warn!(
                request_id = %id,
                response_code,
                "Response lost race against a concurrent answer"
            );
            return Err(InvalidTransitionError::AlreadyAnswered { id }.into());
        }

        request.mark_answered(response_code, received_at)?;

        tracing::info!(
            request_id = %id,
            response_code,
            received_at = %received_at,
            "ERP adapter request answered"
        );

        Ok(request)
    }

    /// Unanswered requests issued before `cutoff`, oldest first.
    pub async fn unanswered_before(&self, cutoff: Timestamp) -> DbResult<Vec<ErpAdapterRequest>> {
        let supported = self.supported.supported_types();
        ErpAdapterRequestRepo::list_unanswered_issued_before(&self.pool, cutoff)
            .await?
            .into_iter()
            .map(|row| row.into_domain(&supported))
            .collect()
    }

    /// Delete a request. Returns `true` if it existed.
    pub async fn delete(&self, id: RequestId) -> DbResult<bool> {
        let deleted = ErpAdapterRequestRepo::delete(&self.pool, id).await?;
        if deleted {
            tracing::info!(request_id = %id, "ERP adapter request deleted");
        }
        Ok(deleted)
    }
}
