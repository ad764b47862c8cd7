//! Baseline persistence
//!
//! Provides:
//! - `SnapshotStore`, the seam the dispatcher talks to
//! - `FsStore`, one file per fingerprint in a flat directory
//! - Atomic writes with explicit short-write detection

mod atomic;
mod fs_store;

pub use atomic::atomic_write;
pub use fs_store::FsStore;

use crate::errors::Result;
use serde_json::Value;
use snapguard_core::Fingerprint;
use std::path::PathBuf;

/// Keyed storage of baselines.
///
/// "No baseline" is `Ok(None)` from [`load`](Self::load), never an error.
pub trait SnapshotStore: Send + Sync {
    /// Persist `value` under `fingerprint`, replacing any previous baseline.
    ///
    /// # Errors
    ///
    /// `CreateDir`, `OpenForWrite`, `ShortWrite` or `Serialization` when the
    /// value was not durably stored in full.
    fn save(&self, fingerprint: &Fingerprint, value: &Value) -> Result<()>;

    /// Fetch the baseline for `fingerprint`, if there is one.
    ///
    /// # Errors
    ///
    /// `Read` when the baseline exists but cannot be read, `Serialization`
    /// when its contents do not decode.
    fn load(&self, fingerprint: &Fingerprint) -> Result<Option<Value>>;

    /// Delete every baseline and return how many were removed.
    ///
    /// # Errors
    ///
    /// `Delete` when at least one entry could not be removed; the others are
    /// still attempted.
    fn clear(&self) -> Result<usize>;

    /// Where the baseline for `fingerprint` lives, for diagnostics.
    fn location(&self, fingerprint: &Fingerprint) -> PathBuf;
}
