//! Request validation engine.
//!
//! Provides rule and error types, pure format validators, the supported
//! request type allow-list, and the pipeline that composes them.

pub mod allow_list;
pub mod format;
pub mod pipeline;
pub mod rules;
