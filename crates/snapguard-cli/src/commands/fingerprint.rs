//! Fingerprint command
//!
//! Usage: snapguard fingerprint --origin <ORIGIN> --path <PATH> [--query <QS>]
//!        [--suffix <S>] [--control-key <KEY>]

use clap::Args;
use snapguard_core::{fingerprint, Request};

#[derive(Debug, Args)]
pub struct FingerprintArgs {
    #[arg(long)]
    pub origin: String,

    #[arg(long)]
    pub path: String,

    #[arg(long, default_value = "")]
    pub query: String,

    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Query parameter excluded from the identity
    #[arg(long, default_value = "TEST")]
    pub control_key: String,

    /// Also print the canonical string that was hashed
    #[arg(long)]
    pub verbose: bool,
}

pub fn execute(args: FingerprintArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = Request::parse(args.origin, args.path, &args.query);
    let identity = request.identity(&args.control_key, &args.suffix);

    println!("{}", fingerprint(&identity));
    if args.verbose {
        println!("{}", identity.canonical_string());
    }
    Ok(())
}
