//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod erp_adapter_request_repo;

pub use erp_adapter_request_repo::ErpAdapterRequestRepo;
