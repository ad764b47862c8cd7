//! Snapguard Engine - command dispatch
//!
//! Reads the control command from a request and coordinates fingerprinting,
//! the baseline store, comparison and diff rendering.

pub mod commands;
pub mod dispatcher;
pub mod outcome;

pub use dispatcher::Dispatcher;
pub use outcome::{DispatchOutcome, FailureReason, SkipReason};
