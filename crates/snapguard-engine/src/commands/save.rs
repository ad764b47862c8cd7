//! `save`: record the value as the baseline for its fingerprint.

use super::{elapsed_ms, CommandContext};
use crate::outcome::DispatchOutcome;
use serde_json::Value;
use snapguard_core::{log_op_end, log_op_error, log_op_start, Fingerprint};

pub fn save_baseline(
    ctx: &CommandContext<'_>,
    fingerprint: &Fingerprint,
    value: &Value,
) -> DispatchOutcome {
    let logging = ctx.logging();
    if logging {
        log_op_start!("save_baseline", fingerprint = %fingerprint);
    }
    let start = std::time::Instant::now();

    match ctx.store.save(fingerprint, value) {
        Ok(()) => {
            if logging {
                log_op_end!("save_baseline", duration_ms = elapsed_ms(start));
            }
            DispatchOutcome::Saved {
                fingerprint: *fingerprint,
            }
        }
        Err(error) => {
            if logging {
                log_op_error!("save_baseline", error, duration_ms = elapsed_ms(start));
            }
            DispatchOutcome::SaveFailed {
                fingerprint: *fingerprint,
                error,
            }
        }
    }
}
