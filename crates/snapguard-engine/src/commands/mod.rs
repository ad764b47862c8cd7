//! Command handlers.
//!
//! One function per control command. Each handler:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! all gated by the `logging` feature. The store only emits
//! `tracing::debug!` for internal details.

pub mod assert;
pub mod clear;
pub mod save;

use snapguard_core::{DiffRenderer, SnapguardConfig, FEATURE_LOGGING};
use snapguard_store::SnapshotStore;

/// Collaborators a handler may use.
pub struct CommandContext<'a> {
    pub config: &'a SnapguardConfig,
    pub store: &'a dyn SnapshotStore,
    pub renderer: &'a dyn DiffRenderer,
}

impl CommandContext<'_> {
    pub fn logging(&self) -> bool {
        self.config.feature_enabled(FEATURE_LOGGING)
    }
}

pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
