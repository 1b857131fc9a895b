//! Flowgrid CLI
//!
//! Validates configuration and inspects the provider backends compiled into
//! the binary. The long-running workflow engine embeds the same
//! `AppContext`; this binary only exercises the composition root.

// Force-link flowgrid-providers so linkme registrations are included
extern crate flowgrid_providers;

use clap::{Parser, Subcommand};

/// Command line interface for Flowgrid
#[derive(Parser, Debug)]
#[command(name = "flowgrid")]
#[command(about = "Flowgrid - workflow builder service runtime")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Load and validate configuration, creating the configured services
    Check,
    /// List the provider backends linked into this binary
    Providers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = match cli.command {
        Some(CliCommand::Providers) => flowgrid::Command::Providers,
        Some(CliCommand::Check) | None => flowgrid::Command::Check,
    };
    flowgrid::run(cli.config.as_deref(), command).await
}
