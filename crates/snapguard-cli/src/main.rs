//! Snapguard CLI
//!
//! Command-line interface for recording and replaying snapshot baselines

use clap::{Parser, Subcommand};
use snapguard_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "snapguard")]
#[command(about = "Snapguard - record/replay snapshot testing", long_about = None)]
struct Cli {
    /// Emit logs as JSON instead of human-readable text
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Dispatch the control command carried by a request
    Run(commands::run::RunArgs),
    /// Print the fingerprint a request would be stored under
    Fingerprint(commands::fingerprint::FingerprintArgs),
    /// Print a stored baseline
    Show(commands::show::ShowArgs),
    /// List stored baseline fingerprints
    List(commands::show::ListArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Fingerprint(args) => commands::fingerprint::execute(args),
        Commands::Show(args) => commands::show::execute(args),
        Commands::List(args) => commands::show::execute_list(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
