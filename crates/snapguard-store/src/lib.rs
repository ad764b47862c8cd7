//! Snapguard Store - baseline persistence
//!
//! Provides:
//! - The `SnapshotStore` trait the dispatcher is written against
//! - `FsStore`, a flat directory holding one JSON file per fingerprint
//! - Atomic, byte-accounted writes (temp file, fsync, rename)

pub mod baseline;
pub mod errors;

// Re-export key types
pub use baseline::{FsStore, SnapshotStore};
pub use errors::Result;
