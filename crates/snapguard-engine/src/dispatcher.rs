//! The single entry point a host calls per run.

use crate::commands::assert::assert_baseline;
use crate::commands::clear::clear_baselines;
use crate::commands::save::save_baseline;
use crate::commands::CommandContext;
use crate::outcome::{DispatchOutcome, SkipReason};
use serde_json::Value;
use snapguard_core::diff::renderer_from_config;
use snapguard_core::{
    log_dispatch, AccessCheck, AllowAll, Command, DiffRenderer, Fingerprint, Request,
    SnapguardConfig,
};
use snapguard_core_types::schema::{OUTCOME_FAIL, OUTCOME_OK};
use snapguard_core_types::RequestId;
use snapguard_store::{FsStore, SnapshotStore};

/// Routes the control command of a request to its handler.
///
/// Holds everything a dispatch needs; there is no process-wide state.
/// `Send + Sync`, so one dispatcher can serve concurrent requests.
pub struct Dispatcher {
    config: SnapguardConfig,
    store: Box<dyn SnapshotStore>,
    renderer: Box<dyn DiffRenderer>,
    access: Box<dyn AccessCheck>,
}

impl Dispatcher {
    /// Dispatcher over `store`, with the renderer the config selects and
    /// every caller allowed.
    pub fn new(config: SnapguardConfig, store: impl SnapshotStore + 'static) -> Self {
        let renderer = renderer_from_config(&config.diff);
        Self {
            config,
            store: Box::new(store),
            renderer,
            access: Box::new(AllowAll),
        }
    }

    /// Dispatcher over an [`FsStore`] at `config.store_dir`.
    pub fn from_config(config: SnapguardConfig) -> Self {
        let store = FsStore::new(config.store_dir.clone());
        Self::new(config, store)
    }

    pub fn with_renderer(mut self, renderer: impl DiffRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_access_check(mut self, access: impl AccessCheck + 'static) -> Self {
        self.access = Box::new(access);
        self
    }

    pub fn config(&self) -> &SnapguardConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }

    /// Run whatever command `request` carries against `value`.
    ///
    /// `suffix` separates baselines that share a URL (e.g. per device).
    /// Never panics and never returns an error: failures are outcomes.
    pub fn dispatch(&self, request: &Request, value: &Value, suffix: &str) -> DispatchOutcome {
        if !self.config.enabled {
            return DispatchOutcome::Skipped(SkipReason::Disabled);
        }
        if !self.access.is_allowed() {
            return DispatchOutcome::Skipped(SkipReason::AccessDenied);
        }

        let Some(raw) = request.command(&self.config.control_key) else {
            return DispatchOutcome::Skipped(SkipReason::NoCommand);
        };
        let Some(command) = Command::parse(raw) else {
            tracing::warn!(
                control_key = %self.config.control_key,
                command = raw,
                "Unknown control command ignored"
            );
            return DispatchOutcome::Skipped(SkipReason::UnknownCommand(raw.to_string()));
        };

        let request_id = RequestId::new();
        let identity = request.identity(&self.config.control_key, suffix);
        let ctx = CommandContext {
            config: &self.config,
            store: self.store.as_ref(),
            renderer: self.renderer.as_ref(),
        };

        // clear is global; only save and assert are keyed
        let (outcome, fingerprint) = match command {
            Command::Save => {
                let fingerprint = Fingerprint::of(&identity);
                (save_baseline(&ctx, &fingerprint, value), Some(fingerprint))
            }
            Command::Assert => {
                let fingerprint = Fingerprint::of(&identity);
                (
                    assert_baseline(&ctx, &identity, &fingerprint, value),
                    Some(fingerprint),
                )
            }
            Command::Clear => (clear_baselines(&ctx), None),
        };

        if ctx.logging() {
            let status = if outcome.is_success() {
                OUTCOME_OK
            } else {
                OUTCOME_FAIL
            };
            let url = identity.canonical_url();
            let fingerprint = fingerprint.map(|f| f.to_hex()).unwrap_or_default();
            log_dispatch!(
                command.as_str(),
                outcome = status,
                url = url.as_str(),
                suffix = suffix,
                fingerprint = fingerprint.as_str(),
                request_id = %request_id
            );
        }

        outcome
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
