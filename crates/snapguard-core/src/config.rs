//! Engine configuration, loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! enabled = true
//! control_key = "TEST"
//! store_dir = ".snapguard/baselines"
//!
//! [features]
//! logging = true
//!
//! [diff]
//! renderer = "external"
//! program = "diff"
//! escape_html = true
//! context_lines = 3
//! ```

use crate::errors::{Result, SnapguardError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Feature switch for the per-command `dispatch` log event.
pub const FEATURE_LOGGING: &str = "logging";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapguardConfig {
    /// Master switch; when off every dispatch is a no-op.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Reserved query parameter carrying the command.
    #[serde(default = "default_control_key")]
    pub control_key: String,
    /// Directory holding one file per baseline.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Named feature switches. A feature with no entry is on.
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
    #[serde(default)]
    pub diff: DiffConfig,
}

/// Which [`DiffRenderer`](crate::diff::DiffRenderer) to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// `diff -u` subprocess over scratch files
    #[default]
    External,
    /// In-process line diff
    Line,
}

/// `[diff]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffConfig {
    #[serde(default)]
    pub renderer: RendererKind,
    /// Program run by the external renderer.
    #[serde(default = "default_program")]
    pub program: String,
    /// Escape `& < > " '` in both sides before diffing.
    #[serde(default = "default_escape_html")]
    pub escape_html: bool,
    /// Context radius for the line renderer.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
    /// Where the external renderer puts its scratch files. System temp dir
    /// when unset.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

const fn default_enabled() -> bool {
    true
}

fn default_control_key() -> String {
    "TEST".to_string()
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".snapguard/baselines")
}

fn default_program() -> String {
    "diff".to_string()
}

const fn default_escape_html() -> bool {
    true
}

const fn default_context_lines() -> usize {
    3
}

impl Default for SnapguardConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            control_key: default_control_key(),
            store_dir: default_store_dir(),
            features: BTreeMap::new(),
            diff: DiffConfig::default(),
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::default(),
            program: default_program(),
            escape_html: default_escape_html(),
            context_lines: default_context_lines(),
            scratch_dir: None,
        }
    }
}

impl SnapguardConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SnapguardError::InvalidConfig`] on malformed TOML or a
    /// failed [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SnapguardConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapguardError::InvalidConfig`] when the file cannot be read
    /// or is not a valid config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SnapguardError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapguardError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.control_key.is_empty() {
            return Err(invalid("control_key must not be empty"));
        }
        if self.control_key.contains(['=', '&']) {
            return Err(invalid("control_key must not contain '=' or '&'"));
        }
        if self.store_dir.as_os_str().is_empty() {
            return Err(invalid("store_dir must not be empty"));
        }
        if self.diff.program.trim().is_empty() {
            return Err(invalid("diff.program must not be empty"));
        }
        Ok(())
    }

    pub fn feature_enabled(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(true)
    }

    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = dir.into();
        self
    }

    pub fn with_feature(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.features.insert(name.into(), enabled);
        self
    }
}

fn invalid(reason: &str) -> SnapguardError {
    SnapguardError::InvalidConfig {
        reason: reason.to_string(),
    }
}
