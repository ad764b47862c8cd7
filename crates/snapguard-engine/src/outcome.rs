//! What a dispatch did, as data.
//!
//! Nothing escapes `Dispatcher::dispatch` as a panic or an `Err`; every
//! path ends in one of these values and the host decides what to print
//! and whether to stop.

use snapguard_core::report::{missing_baseline_message, render_html, render_text};
use snapguard_core::{AssertReport, Command, Fingerprint, SgError};
use std::path::PathBuf;

/// Acknowledgement the host emits before halting after `clear`.
pub const CLEAR_ACK: &str = "clear";

/// Why nothing was done. Every skip counts as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `enabled = false` in the config
    Disabled,
    /// The access check said no
    AccessDenied,
    /// The control key was absent
    NoCommand,
    /// The control key held something other than `save`, `assert` or `clear`
    UnknownCommand(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "engine disabled"),
            SkipReason::AccessDenied => write!(f, "access denied"),
            SkipReason::NoCommand => write!(f, "no command"),
            SkipReason::UnknownCommand(value) => write!(f, "unknown command '{}'", value),
        }
    }
}

/// Why an assertion failed.
#[derive(Debug, Clone)]
pub enum FailureReason {
    /// Nothing saved under this fingerprint yet
    MissingBaseline { location: PathBuf },
    /// The baseline exists but could not be read or decoded
    Store(SgError),
    /// One or more fields differ
    Mismatch(AssertReport),
}

#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    Skipped(SkipReason),
    Saved {
        fingerprint: Fingerprint,
    },
    SaveFailed {
        fingerprint: Fingerprint,
        error: SgError,
    },
    AssertPassed {
        fingerprint: Fingerprint,
    },
    AssertFailed {
        fingerprint: Fingerprint,
        reason: FailureReason,
    },
    Cleared {
        removed: usize,
    },
    ClearFailed {
        error: SgError,
    },
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            DispatchOutcome::Skipped(_)
                | DispatchOutcome::Saved { .. }
                | DispatchOutcome::AssertPassed { .. }
                | DispatchOutcome::Cleared { .. }
        )
    }

    /// `clear` ends the host's request flow whether or not it succeeded.
    pub fn is_halt(&self) -> bool {
        matches!(
            self,
            DispatchOutcome::Cleared { .. } | DispatchOutcome::ClearFailed { .. }
        )
    }

    /// The fixed acknowledgement for halting outcomes.
    pub fn ack(&self) -> Option<&'static str> {
        self.is_halt().then_some(CLEAR_ACK)
    }

    /// The command that ran; `None` for skips.
    pub fn command(&self) -> Option<Command> {
        match self {
            DispatchOutcome::Skipped(_) => None,
            DispatchOutcome::Saved { .. } | DispatchOutcome::SaveFailed { .. } => {
                Some(Command::Save)
            }
            DispatchOutcome::AssertPassed { .. } | DispatchOutcome::AssertFailed { .. } => {
                Some(Command::Assert)
            }
            DispatchOutcome::Cleared { .. } | DispatchOutcome::ClearFailed { .. } => {
                Some(Command::Clear)
            }
        }
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        match self {
            DispatchOutcome::Saved { fingerprint }
            | DispatchOutcome::SaveFailed { fingerprint, .. }
            | DispatchOutcome::AssertPassed { fingerprint }
            | DispatchOutcome::AssertFailed { fingerprint, .. } => Some(fingerprint),
            _ => None,
        }
    }

    /// The assertion report, when the failure was a mismatch.
    pub fn report(&self) -> Option<&AssertReport> {
        match self {
            DispatchOutcome::AssertFailed {
                reason: FailureReason::Mismatch(report),
                ..
            } => Some(report),
            _ => None,
        }
    }

    /// Text a host shows for a failure; `None` for successes.
    ///
    /// With `html` set, mismatch reports are wrapped in a `<pre>` page.
    pub fn diagnostic(&self, html: bool) -> Option<String> {
        match self {
            DispatchOutcome::SaveFailed { error, .. } | DispatchOutcome::ClearFailed { error } => {
                Some(error.to_string())
            }
            DispatchOutcome::AssertFailed { reason, .. } => Some(match reason {
                FailureReason::MissingBaseline { location } => missing_baseline_message(location),
                FailureReason::Store(error) => error.to_string(),
                FailureReason::Mismatch(report) if html => render_html(report),
                FailureReason::Mismatch(report) => render_text(report),
            }),
            _ => None,
        }
    }
}
