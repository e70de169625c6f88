//! Domain core for requests sent to a partner's ERP adapter.
//!
//! Pure logic only: the request record, its validation rules, and the
//! issued → answered lifecycle. Persistence lives in `erp-adapter-db`.

pub mod asset_type;
pub mod config;
pub mod erp_request;
pub mod error;
pub mod ids;
pub mod patterns;
pub mod types;
pub mod validation;
