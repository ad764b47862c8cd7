pub mod fingerprint;
pub mod run;
pub mod show;

use snapguard_core::SnapguardConfig;
use std::path::{Path, PathBuf};

/// Config from `--config` (or defaults), with `--store` taking precedence
/// over `store_dir`.
pub fn resolve_config(
    config: Option<&Path>,
    store: Option<PathBuf>,
) -> Result<SnapguardConfig, Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => SnapguardConfig::load(path)?,
        None => SnapguardConfig::default(),
    };
    if let Some(store) = store {
        config.store_dir = store;
    }
    config.validate()?;
    Ok(config)
}
