//! `assert`: compare the value against its baseline.
//!
//! A missing baseline fails before any comparison or rendering happens.
//! Each mismatched field is rendered through the configured renderer; if
//! the renderer fails for a field, that field falls back to a plain
//! expected/saved dump so the report is never empty.

use super::{elapsed_ms, CommandContext};
use crate::outcome::{DispatchOutcome, FailureReason};
use serde_json::Value;
use snapguard_core::compare::{compare, MatchResult, MismatchEntry};
use snapguard_core::diff::escape_html;
use snapguard_core::report::{plain_dump, AssertReport, FieldDiff, MISSING_VALUE};
use snapguard_core::{log_op_end, log_op_error, log_op_start, Fingerprint, Identity};

pub fn assert_baseline(
    ctx: &CommandContext<'_>,
    identity: &Identity,
    fingerprint: &Fingerprint,
    value: &Value,
) -> DispatchOutcome {
    let logging = ctx.logging();
    if logging {
        log_op_start!("assert_baseline", fingerprint = %fingerprint);
    }
    let start = std::time::Instant::now();

    let stored = match ctx.store.load(fingerprint) {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            let location = ctx.store.location(fingerprint);
            if logging {
                log_op_end!(
                    "assert_baseline",
                    duration_ms = elapsed_ms(start),
                    missing_baseline = true
                );
            }
            return failed(*fingerprint, FailureReason::MissingBaseline { location });
        }
        Err(error) => {
            if logging {
                log_op_error!("assert_baseline", error, duration_ms = elapsed_ms(start));
            }
            return failed(*fingerprint, FailureReason::Store(error));
        }
    };

    let result = compare(value, &stored);
    if logging {
        log_op_end!(
            "assert_baseline",
            duration_ms = elapsed_ms(start),
            fingerprint = %fingerprint,
            mismatch_count = result.mismatches().len()
        );
    }

    match result {
        MatchResult::Mismatch(entries) if !entries.is_empty() => {
            let report = AssertReport {
                fingerprint: *fingerprint,
                canonical_url: identity.canonical_url(),
                suffix: identity.suffix().to_string(),
                fields: entries.iter().map(|entry| render_field(ctx, entry)).collect(),
            };
            failed(*fingerprint, FailureReason::Mismatch(report))
        }
        _ => DispatchOutcome::AssertPassed {
            fingerprint: *fingerprint,
        },
    }
}

fn failed(fingerprint: Fingerprint, reason: FailureReason) -> DispatchOutcome {
    DispatchOutcome::AssertFailed {
        fingerprint,
        reason,
    }
}

fn render_field(ctx: &CommandContext<'_>, entry: &MismatchEntry) -> FieldDiff {
    let stored = entry.stored.as_deref().unwrap_or(MISSING_VALUE);
    let (expected, stored) = if ctx.config.diff.escape_html {
        (escape_html(&entry.expected), escape_html(stored))
    } else {
        (entry.expected.clone(), stored.to_string())
    };

    let diff = ctx.renderer.render(&expected, &stored).unwrap_or_else(|err| {
        tracing::warn!(key = %entry.key, error = %err, "Diff renderer failed, using plain dump");
        plain_dump(&expected, &stored)
    });

    FieldDiff {
        key: entry.key.clone(),
        diff,
    }
}
