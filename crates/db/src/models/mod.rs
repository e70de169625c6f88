//! Database row structs.
//!
//! Each submodule contains a `FromRow` struct matching the table row and the
//! conversion to and from the domain record in `erp_adapter_core`.

pub mod erp_adapter_request;
