//! Core types shared across the hbc crates
//!
//! - **Correlation types**: RequestId, Origin, DispatchContext
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod correlation;
pub mod schema;

pub use correlation::{DispatchContext, Origin, RequestId};
