//! Canonical schema constants for structured logging and events
//!
//! Field and event names emitted by the `log_*` macros and the handlers in
//! snapguard-engine, and read back by the test capture layer. `tracing`
//! takes field names as identifiers, so the emitting side spells them out;
//! a rename here must be mirrored there.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Dispatch identity
pub const FIELD_COMMAND: &str = "command";
pub const FIELD_URL: &str = "url";
pub const FIELD_SUFFIX: &str = "suffix";
pub const FIELD_FINGERPRINT: &str = "fingerprint";
pub const FIELD_OUTCOME: &str = "outcome";

// Collection sizes
pub const FIELD_MISMATCH_COUNT: &str = "mismatch_count";
pub const FIELD_REMOVED_COUNT: &str = "removed_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_DISPATCH: &str = "dispatch";

// Dispatch outcomes
pub const OUTCOME_OK: &str = "OK";
pub const OUTCOME_FAIL: &str = "fail";
