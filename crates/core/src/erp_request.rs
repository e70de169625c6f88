//! ERP adapter request record and its issued → answered lifecycle.
//!
//! A record is created once it passes every field rule, starts out
//! [`RequestStatus::Issued`], and moves to [`RequestStatus::Answered`] exactly
//! once when the partner's reply is correlated back to it. The two response
//! fields live in a single [`ErpResponse`], so a half-answered record cannot
//! be represented.

use serde::{Deserialize, Serialize};

use crate::asset_type::{AssetType, DirectionCharacteristic};
use crate::ids::IdGenerator;
use crate::types::{truncate_to_micros, RequestId, Timestamp};
use crate::validation::allow_list::{SupportedRequestTypes, SupportedTypesSource};
use crate::validation::pipeline::{collect_request_violations, RequestFields, Violations};
use crate::validation::rules::{FieldViolation, ValidationError};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for issuing a new request.
///
/// Every field is optional so that an absent field (e.g. omitted from JSON)
/// is reported as a `Missing` violation rather than a parse error. Enum
/// fields still have to name a known variant: an unknown `request_type` or
/// `direction_characteristic` fails deserialization before any rule runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateErpAdapterRequest {
    pub partner_bpnl: Option<String>,
    pub request_type: Option<AssetType>,
    pub samm_version: Option<String>,
    pub request_date: Option<Timestamp>,
    pub own_material_number: Option<String>,
    pub direction_characteristic: Option<DirectionCharacteristic>,
}

/// The correlated answer from the partner's ERP system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErpResponse {
    pub response_code: i32,
    pub response_received_date: Timestamp,
}

/// Lifecycle state, derived from whether a response is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Issued,
    Answered,
}

/// One outbound inquiry to a partner's ERP system and its optional answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErpAdapterRequest {
    id: RequestId,
    partner_bpnl: String,
    request_type: AssetType,
    samm_version: String,
    request_date: Timestamp,
    own_material_number: String,
    direction_characteristic: Option<DirectionCharacteristic>,
    #[serde(flatten)]
    response: Option<ErpResponse>,
}

/// Flat, fully owned field set of a stored record, used to rehydrate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErpAdapterRequestParts {
    pub id: RequestId,
    pub partner_bpnl: String,
    pub request_type: AssetType,
    pub samm_version: String,
    pub request_date: Timestamp,
    pub own_material_number: String,
    pub direction_characteristic: Option<DirectionCharacteristic>,
    pub response_code: Option<i32>,
    pub response_received_date: Option<Timestamp>,
}

/// Rejected issued → answered transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidTransitionError {
    #[error("ERP adapter request {id} has already been answered")]
    AlreadyAnswered { id: RequestId },

    #[error(
        "Response for ERP adapter request {id} received at {received_at}, \
         before the request date {request_date}"
    )]
    ReceivedBeforeRequest {
        id: RequestId,
        request_date: Timestamp,
        received_at: Timestamp,
    },
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl ErpAdapterRequest {
    /// Validate `input` and issue a new, unanswered record.
    ///
    /// All violated rules are reported together. The supported type set is
    /// read from `supported` at call time. `request_date` is truncated to
    /// microseconds.
    pub fn create(
        input: CreateErpAdapterRequest,
        supported: &dyn SupportedTypesSource,
        ids: &dyn IdGenerator,
    ) -> Result<Self, ValidationError> {
        let supported = supported.supported_types();
        let mut violations = Violations::new();
        collect_request_violations(
            &RequestFields {
                partner_bpnl: input.partner_bpnl.as_deref(),
                request_type: input.request_type,
                samm_version: input.samm_version.as_deref(),
                request_date: input.request_date,
                own_material_number: input.own_material_number.as_deref(),
            },
            &supported,
            &mut violations,
        );

        match (
            input.partner_bpnl,
            input.request_type,
            input.samm_version,
            input.request_date,
            input.own_material_number,
        ) {
            (
                Some(partner_bpnl),
                Some(request_type),
                Some(samm_version),
                Some(request_date),
                Some(own_material_number),
            ) if violations.is_empty() => Ok(Self {
                id: ids.next_id(),
                partner_bpnl,
                request_type,
                samm_version,
                request_date: truncate_to_micros(request_date),
                own_material_number,
                direction_characteristic: input.direction_characteristic,
                response: None,
            }),
            _ => Err(violations.into_error()),
        }
    }

    /// Rebuild a record from stored fields, re-checking every invariant.
    ///
    /// Besides the field rules this rejects rows where only one response
    /// field is set, or where the response predates the request.
    pub fn restore(
        parts: ErpAdapterRequestParts,
        supported: &SupportedRequestTypes,
    ) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        collect_request_violations(
            &RequestFields {
                partner_bpnl: Some(parts.partner_bpnl.as_str()),
                request_type: Some(parts.request_type),
                samm_version: Some(parts.samm_version.as_str()),
                request_date: Some(parts.request_date),
                own_material_number: Some(parts.own_material_number.as_str()),
            },
            supported,
            &mut violations,
        );

        let response = match (parts.response_code, parts.response_received_date) {
            (None, None) => None,
            (Some(response_code), Some(response_received_date)) => {
                if response_received_date < parts.request_date {
                    violations.push(FieldViolation::ResponseBeforeRequest {
                        request_date: parts.request_date,
                        response_received_date,
                    });
                }
                Some(ErpResponse {
                    response_code,
                    response_received_date,
                })
            }
            (response_code, response_received_date) => {
                violations.push(FieldViolation::PartialResponse {
                    response_code,
                    response_received_date,
                });
                None
            }
        };

        violations.finish()?;

        Ok(Self {
            id: parts.id,
            partner_bpnl: parts.partner_bpnl,
            request_type: parts.request_type,
            samm_version: parts.samm_version,
            request_date: parts.request_date,
            own_material_number: parts.own_material_number,
            direction_characteristic: parts.direction_characteristic,
            response,
        })
    }

    /// Flatten into stored fields.
    pub fn to_parts(&self) -> ErpAdapterRequestParts {
        ErpAdapterRequestParts {
            id: self.id,
            partner_bpnl: self.partner_bpnl.clone(),
            request_type: self.request_type,
            samm_version: self.samm_version.clone(),
            request_date: self.request_date,
            own_material_number: self.own_material_number.clone(),
            direction_characteristic: self.direction_characteristic,
            response_code: self.response_code(),
            response_received_date: self.response_received_date(),
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl ErpAdapterRequest {
    /// Record the partner's answer.
    ///
    /// Allowed once per record, with `received_at` not before the request
    /// date. Both response fields are set together. Callers sharing a record
    /// across threads or processes must serialize this call themselves; the
    /// persistence layer does so with a conditional update. `received_at`
    /// is truncated to microseconds before it is checked and stored.
    pub fn mark_answered(
        &mut self,
        response_code: i32,
        received_at: Timestamp,
    ) -> Result<(), InvalidTransitionError> {
        let received_at = truncate_to_micros(received_at);
        self.check_answerable(received_at)?;
        self.response = Some(ErpResponse {
            response_code,
            response_received_date: received_at,
        });
        Ok(())
    }

    /// Check the transition preconditions without applying it.
    pub fn check_answerable(&self, received_at: Timestamp) -> Result<(), InvalidTransitionError> {
        let received_at = truncate_to_micros(received_at);
        if self.is_answered() {
            return Err(InvalidTransitionError::AlreadyAnswered { id: self.id });
        }
        if received_at < self.request_date {
            return Err(InvalidTransitionError::ReceivedBeforeRequest {
                id: self.id,
                request_date: self.request_date,
                received_at,
            });
        }
        Ok(())
    }

    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }

    pub fn status(&self) -> RequestStatus {
        if self.is_answered() {
            RequestStatus::Answered
        } else {
            RequestStatus::Issued
        }
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl ErpAdapterRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn partner_bpnl(&self) -> &str {
        &self.partner_bpnl
    }

    pub fn request_type(&self) -> AssetType {
        self.request_type
    }

    pub fn samm_version(&self) -> &str {
        &self.samm_version
    }

    pub fn request_date(&self) -> Timestamp {
        self.request_date
    }

    pub fn own_material_number(&self) -> &str {
        &self.own_material_number
    }

    pub fn direction_characteristic(&self) -> Option<DirectionCharacteristic> {
        self.direction_characteristic
    }

    pub fn response(&self) -> Option<&ErpResponse> {
        self.response.as_ref()
    }

    pub fn response_code(&self) -> Option<i32> {
        self.response.map(|r| r.response_code)
    }

    pub fn response_received_date(&self) -> Option<Timestamp> {
        self.response.map(|r| r.response_received_date)
    }
}
