use anyhow::Result;
use clap::Parser;

use portfolio_assistant::{cli::Cli, runtime::Orchestrator, utils::init_logger};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; only enabled on request so the TUI stays clean
    if cli.verbose {
        init_logger();
    }

    Orchestrator::new(cli)?.run().await
}
