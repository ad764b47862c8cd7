//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use snapguard_core::log_op_start;
/// log_op_start!("save_baseline");
/// log_op_start!("save_baseline", fingerprint = "3f78...");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use snapguard_core::log_op_end;
/// log_op_end!("save_baseline", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` may be an `SgError`, a `SnapguardError`, or a reference to either.
///
/// # Example
///
/// ```
/// # use snapguard_core::log_op_error;
/// # use snapguard_core::errors::{SgError, SgErrorKind};
/// let err = SgError::new(SgErrorKind::Read);
/// log_op_error!("load_baseline", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let sg_err = $crate::errors::SgError::from($err.clone());
        $crate::__private::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?sg_err.kind(),
            err.code = sg_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let sg_err = $crate::errors::SgError::from($err.clone());
        $crate::__private::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?sg_err.kind(),
            err.code = sg_err.code(),
            $($field)*
        );
    }};
}

/// Log the single structured event emitted per dispatched command
///
/// # Example
///
/// ```
/// # use snapguard_core::log_dispatch;
/// log_dispatch!("save", outcome = "OK", url = "https://x/p", suffix = "");
/// ```
#[macro_export]
macro_rules! log_dispatch {
    ($command:expr, outcome = $outcome:expr) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = "dispatch",
            event = $crate::__private::schema::EVENT_DISPATCH,
            command = $command,
            outcome = $outcome,
        );
    };
    ($command:expr, outcome = $outcome:expr, $($field:tt)*) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = "dispatch",
            event = $crate::__private::schema::EVENT_DISPATCH,
            command = $command,
            outcome = $outcome,
            $($field)*
        );
    };
}
