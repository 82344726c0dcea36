//! Core types shared across dynprompt facilities
//!
//! This crate provides the small set of types used by both the error and
//! logging facilities as well as the transport crates:
//!
//! - **Correlation types**: RequestId, RequestContext
//! - **Schema constants**: Canonical field keys, event names and storage key suffixes

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId};
