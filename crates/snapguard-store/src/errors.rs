//! Error handling for snapguard-store
//!
//! Wraps snapguard-core SgError with store-specific helpers

use snapguard_core::errors::{SgError, SgErrorKind};
use snapguard_core::Fingerprint;
use std::path::Path;

/// Result type alias using SgError
pub type Result<T> = std::result::Result<T, SgError>;

/// Create an error from a failed filesystem call
pub fn io_error(kind: SgErrorKind, operation: &str, path: &Path, err: std::io::Error) -> SgError {
    SgError::new(kind)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an error for a baseline that could not be encoded or decoded
pub fn serialization_error(
    operation: &str,
    fingerprint: &Fingerprint,
    err: serde_json::Error,
) -> SgError {
    SgError::new(SgErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_fingerprint(fingerprint.to_hex())
        .with_message(err.to_string())
}

/// Create the error reported by `clear` when some deletions failed
pub fn delete_failed(root: &Path, failures: usize, first: SgError) -> SgError {
    let message = if failures == 1 {
        first.message().to_string()
    } else {
        format!("{} (and {} more failures)", first.message(), failures - 1)
    };
    let path = first
        .path()
        .map(str::to_string)
        .unwrap_or_else(|| root.display().to_string());
    SgError::new(SgErrorKind::Delete)
        .with_op("clear_baselines")
        .with_path(path)
        .with_message(message)
}
