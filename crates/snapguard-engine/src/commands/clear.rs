//! `clear`: delete every baseline. Always a halting outcome.

use super::{elapsed_ms, CommandContext};
use crate::outcome::DispatchOutcome;
use snapguard_core::{log_op_end, log_op_error, log_op_start};

pub fn clear_baselines(ctx: &CommandContext<'_>) -> DispatchOutcome {
    let logging = ctx.logging();
    if logging {
        log_op_start!("clear_baselines");
    }
    let start = std::time::Instant::now();

    match ctx.store.clear() {
        Ok(removed) => {
            if logging {
                log_op_end!(
                    "clear_baselines",
                    duration_ms = elapsed_ms(start),
                    removed_count = removed
                );
            }
            DispatchOutcome::Cleared { removed }
        }
        Err(error) => {
            if logging {
                log_op_error!("clear_baselines", error, duration_ms = elapsed_ms(start));
            }
            DispatchOutcome::ClearFailed { error }
        }
    }
}
