//! Show and list commands
//!
//! Usage: snapguard show <FINGERPRINT> [--store <DIR>] [--config <TOML>]
//!        snapguard list [--store <DIR>] [--config <TOML>]

use clap::Args;
use snapguard_core::report::missing_baseline_message;
use snapguard_core::Fingerprint;
use snapguard_store::{FsStore, SnapshotStore};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// 40-character hex fingerprint
    pub fingerprint: String,

    #[arg(long)]
    pub store: Option<PathBuf>,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let fingerprint = Fingerprint::from_hex(&args.fingerprint)?;
    let config = super::resolve_config(args.config.as_deref(), args.store)?;
    let store = FsStore::new(config.store_dir);

    match store.load(&fingerprint)? {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        None => Err(missing_baseline_message(&store.path_for(&fingerprint)).into()),
    }
}

pub fn execute_list(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::resolve_config(args.config.as_deref(), args.store)?;
    let store = FsStore::new(config.store_dir);

    for fingerprint in store.keys()? {
        println!("{}", fingerprint);
    }
    Ok(())
}
