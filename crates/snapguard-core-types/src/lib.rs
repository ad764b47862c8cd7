//! Core types shared across Snapguard facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: RequestId, one per dispatched invocation
//! - **Schema constants**: Canonical field keys, event names and outcomes

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
