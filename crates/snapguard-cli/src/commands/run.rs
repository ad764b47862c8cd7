//! Run command
//!
//! Usage: snapguard run --origin <ORIGIN> --path <PATH> [--query <QS>]
//!        [--suffix <S>] [--value <FILE|->] [--config <TOML>] [--store <DIR>] [--html]

use clap::Args;
use serde_json::Value;
use snapguard_core::Request;
use snapguard_engine::{DispatchOutcome, Dispatcher};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Scheme and host, e.g. https://example.com
    #[arg(long)]
    pub origin: String,

    /// Request path, e.g. /cart
    #[arg(long)]
    pub path: String,

    /// Raw query string including the control key, e.g. id=7&TEST=save
    #[arg(long, default_value = "")]
    pub query: String,

    /// Disambiguation suffix for baselines sharing a URL
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// JSON file holding the value under test; `-` reads stdin
    #[arg(long, default_value = "-")]
    pub value: String,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Baseline directory (overrides the config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Print mismatch reports as an HTML page
    #[arg(long)]
    pub html: bool,
}

pub fn execute(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::resolve_config(args.config.as_deref(), args.store)?;
    let value = read_value(&args.value)?;
    let request = Request::parse(args.origin, args.path, &args.query);

    let dispatcher = Dispatcher::from_config(config);
    let outcome = dispatcher.dispatch(&request, &value, &args.suffix);

    // Halting outcomes print only the acknowledgement
    if let Some(ack) = outcome.ack() {
        println!("{}", ack);
        return match outcome.diagnostic(false) {
            Some(diagnostic) => Err(diagnostic.into()),
            None => Ok(()),
        };
    }

    match &outcome {
        DispatchOutcome::Skipped(reason) => eprintln!("Skipped: {}", reason),
        DispatchOutcome::Saved { fingerprint } => println!("✓ Saved {}", fingerprint),
        DispatchOutcome::AssertPassed { fingerprint } => println!("✓ Matched {}", fingerprint),
        _ => {}
    }

    if let Some(diagnostic) = outcome.diagnostic(args.html) {
        print!("{}", diagnostic);
        if !diagnostic.ends_with('\n') {
            println!();
        }
    }

    if outcome.is_success() {
        Ok(())
    } else {
        let command = outcome.command().map(|c| c.as_str()).unwrap_or("dispatch");
        Err(format!("{} failed", command).into())
    }
}

/// Empty input is `null`, so commands that ignore the value need none.
fn read_value(source: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let text = if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| format!("Failed to read value file {}: {}", source, e))?
    };

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}
