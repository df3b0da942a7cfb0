//! Top-level command orchestration.
pub mod link;
