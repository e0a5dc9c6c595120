//! Rolegate CLI - Boot and inspect a role-gated module host
//!
//! Usage:
//!   rolegate run [--catalog FILE] [--user NAME] [--role R]...   - Initialize the demo host
//!   rolegate check [--catalog FILE] [--role R]...               - Show which modules would load
//!   rolegate init [dir]                                          - Write a sample catalog.yaml
//!
//! Library logs use the `rolegate` tracing target: `RUST_LOG=rolegate=debug rolegate run`

use clap::{Parser, Subcommand};
use cli::commands::{CheckCommand, InitCommand, RunCommand};

#[derive(Parser)]
#[command(name = "rolegate")]
#[command(about = "Rolegate - Role-gated module initialization")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the demo host for a principal
    Run(RunCommand),
    /// Authorization dry run; constructs nothing
    Check(CheckCommand),
    /// Write a sample catalog
    Init(InitCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(cmd) => cmd.run(cli.json),
        Commands::Check(cmd) => cmd.run(cli.json),
        Commands::Init(cmd) => cmd.run(),
    }
}
