//! Test doubles shared by the engine integration tests

#![allow(dead_code)]

use serde_json::Value;
use snapguard_core::errors::{SgError, SgErrorKind};
use snapguard_core::{Fingerprint, SnapguardError};
use snapguard_store::{Result, SnapshotStore};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    baselines: Mutex<HashMap<Fingerprint, Value>>,
    calls: AtomicUsize,
    fail_save: bool,
    fail_clear: bool,
}

/// In-memory store that counts every call. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn failing_save() -> Self {
        Self {
            inner: Arc::new(Inner {
                fail_save: true,
                ..Inner::default()
            }),
        }
    }

    pub fn failing_clear() -> Self {
        Self {
            inner: Arc::new(Inner {
                fail_clear: true,
                ..Inner::default()
            }),
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.baselines.lock().unwrap().len()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, fingerprint: &Fingerprint, value: &Value) -> Result<()> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_save {
            return Err(SgError::new(SgErrorKind::ShortWrite)
                .with_op("save_baseline")
                .with_message("wrote 0 of 10 bytes"));
        }
        self.inner
            .baselines
            .lock()
            .unwrap()
            .insert(*fingerprint, value.clone());
        Ok(())
    }

    fn load(&self, fingerprint: &Fingerprint) -> Result<Option<Value>> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.inner.baselines.lock().unwrap().get(fingerprint).cloned())
    }

    fn clear(&self) -> Result<usize> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_clear {
            return Err(SgError::new(SgErrorKind::Delete)
                .with_op("clear_baselines")
                .with_message("busy"));
        }
        let mut baselines = self.inner.baselines.lock().unwrap();
        let removed = baselines.len();
        baselines.clear();
        Ok(removed)
    }

    fn location(&self, fingerprint: &Fingerprint) -> PathBuf {
        PathBuf::from("memory").join(fingerprint.to_hex())
    }
}

/// Renderer that records how often it ran
#[derive(Clone, Default)]
pub struct CountingRenderer {
    calls: Arc<AtomicUsize>,
}

impl CountingRenderer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl snapguard_core::DiffRenderer for CountingRenderer {
    fn render(&self, expected: &str, stored: &str) -> snapguard_core::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("-{}\n+{}\n", expected, stored))
    }
}

/// Renderer whose external program never works
pub fn broken_renderer(_: &str, _: &str) -> snapguard_core::Result<String> {
    Err(SnapguardError::DiffProgramFailed {
        program: "diff".to_string(),
        reason: "No such file or directory".to_string(),
    })
}
