//! Snapguard Core - record/replay snapshot testing kernel
//!
//! This crate provides the pure pieces of the engine:
//! - Request identity and SHA-1 fingerprints
//! - Loose structural comparison of JSON values
//! - Pluggable diff rendering (external `diff -u` or in-process)
//! - Configuration, access policy and the command vocabulary
//! - The structured error and logging facilities shared by every crate
//!
//! Persistence lives in `snapguard-store`; the command dispatcher in
//! `snapguard-engine`.

pub mod commands;
pub mod compare;
pub mod config;
pub mod diff;
pub mod errors;
pub mod fingerprint;
pub mod identity;
pub mod logging_facility;
pub mod policy;
pub mod report;
#[cfg(any(test, feature = "test-strategies"))]
pub mod testing;

// Re-export commonly used types
pub use commands::Command;
pub use compare::{compare, loose_eq, MatchResult, MismatchEntry, WHOLE_VALUE_KEY};
pub use config::{DiffConfig, RendererKind, SnapguardConfig, FEATURE_LOGGING};
pub use diff::{DiffRenderer, ExternalDiffRenderer, LineDiffRenderer};
pub use errors::{Result, SgError, SgErrorKind, SnapguardError};
pub use fingerprint::{fingerprint, Fingerprint};
pub use identity::{Identity, QueryParams, Request};
pub use policy::{AccessCheck, AllowAll, DenyAll};
pub use report::{AssertReport, FieldDiff};
pub use serde_json::Value;

// Used by the logging macros; not public API.
#[doc(hidden)]
pub mod __private {
    pub use snapguard_core_types::schema;
    pub use tracing;
}
