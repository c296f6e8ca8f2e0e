// CLI-specific lint overrides
#![allow(clippy::print_stdout, reason = "CLI tools print to stdout")]
#![allow(clippy::print_stderr, reason = "CLI tools print to stderr")]

mod cli;
mod commands;
mod output;
mod tx_input;
mod wallet;

use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so `--json` output on stdout stays parseable.
    // e.g. RUST_LOG=safe_lite=debug safe-lite info ...
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => commands::create::run(args, cli.json).await,
        Commands::Info(args) => commands::info::run(args, cli.json).await,
        Commands::Propose(args) => commands::propose::run(args, cli.json).await,
        Commands::Sign(args) => commands::sign::run(args, cli.json).await,
        Commands::Aggregate(args) => commands::aggregate::run(args, cli.json).await,
    }
}
