//! Filesystem-backed baseline store
//!
//! Layout is a single flat directory. Each baseline is a JSON file whose
//! name is the 40-character lowercase hex fingerprint.

use super::atomic::atomic_write;
use super::SnapshotStore;
use crate::errors::{delete_failed, io_error, serialization_error, Result};
use serde_json::Value;
use snapguard_core::errors::{SgError, SgErrorKind};
use snapguard_core::Fingerprint;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Flat-directory baseline store
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at `root`, creating the directory now.
    ///
    /// # Errors
    ///
    /// `CreateDir` when the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root)
            .map_err(|e| io_error(SgErrorKind::CreateDir, "open_store", &store.root, e))?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<hex fingerprint>`
    pub fn path_for(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.root.join(fingerprint.to_hex())
    }

    /// True when a baseline file exists (a symlink counts if its target does).
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.path_for(fingerprint).is_file()
    }

    /// Fingerprints of all stored baselines, sorted.
    ///
    /// Directories, and files whose names are not lowercase 40-character
    /// hex, are ignored.
    ///
    /// # Errors
    ///
    /// `Read` when the root exists but cannot be listed.
    pub fn keys(&self) -> Result<Vec<Fingerprint>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(SgErrorKind::Read, "list_baselines", &self.root, e)),
        };

        let mut keys: Vec<Fingerprint> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let fingerprint = Fingerprint::from_hex(&name).ok()?;
                (fingerprint.to_hex() == name).then_some(fingerprint)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }
}

impl SnapshotStore for FsStore {
    fn save(&self, fingerprint: &Fingerprint, value: &Value) -> Result<()> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| serialization_error("save_baseline", fingerprint, e))?;
        let path = self.path_for(fingerprint);

        atomic_write(&path, &bytes).map_err(|e| e.with_fingerprint(fingerprint.to_hex()))?;

        tracing::debug!(
            fingerprint = %fingerprint,
            size_bytes = bytes.len(),
            "Saved baseline"
        );
        Ok(())
    }

    fn load(&self, fingerprint: &Fingerprint) -> Result<Option<Value>> {
        let path = self.path_for(fingerprint);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(io_error(SgErrorKind::Read, "load_baseline", &path, e)
                    .with_fingerprint(fingerprint.to_hex()))
            }
        };

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| serialization_error("load_baseline", fingerprint, e))?;
        Ok(Some(value))
    }

    fn clear(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(&self.root).map_err(|e| {
                    io_error(SgErrorKind::CreateDir, "clear_baselines", &self.root, e)
                })?;
                return Ok(0);
            }
            Err(e) => return Err(io_error(SgErrorKind::Read, "clear_baselines", &self.root, e)),
        };

        let mut tally = ClearTally::default();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    let outcome = entry.file_type().and_then(|file_type| {
                        if file_type.is_dir() {
                            Ok(false)
                        } else {
                            fs::remove_file(&path).map(|()| true)
                        }
                    });
                    tally.record(path, outcome);
                }
                Err(e) => tally.record(self.root.clone(), Err(e)),
            }
        }

        tracing::debug!(
            removed = tally.removed,
            failures = tally.failures,
            root = %self.root.display(),
            "Cleared baselines"
        );
        tally.finish(&self.root)
    }

    fn location(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.path_for(fingerprint)
    }
}

/// Running result of a `clear` pass. Every entry is attempted; only the
/// first failure is kept in full.
#[derive(Default)]
struct ClearTally {
    removed: usize,
    failures: usize,
    first_failure: Option<SgError>,
}

impl ClearTally {
    /// `Ok(true)` removed, `Ok(false)` skipped (directory).
    fn record(&mut self, path: PathBuf, outcome: io::Result<bool>) {
        match outcome {
            Ok(true) => self.removed += 1,
            Ok(false) => {}
            // Already gone; someone else cleared it
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                self.failures += 1;
                if self.first_failure.is_none() {
                    self.first_failure =
                        Some(io_error(SgErrorKind::Delete, "clear_baselines", &path, e));
                }
            }
        }
    }

    fn finish(self, root: &Path) -> Result<usize> {
        match self.first_failure {
            Some(first) => Err(delete_failed(root, self.failures, first)),
            None => Ok(self.removed),
        }
    }
}
